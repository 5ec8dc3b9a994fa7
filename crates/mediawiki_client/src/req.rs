use std::collections::HashMap;

use reqwest::Method;
use reqwest::blocking::Client;

use crate::error::Result;

/// Optional request payload for [`invoke`].
pub(crate) enum Body<'a> {
    None,
    /// `application/x-www-form-urlencoded` pairs, encoded by reqwest.
    Form(&'a [(&'a str, String)]),
}

/// Perform one HTTP round trip and return the status code together with
/// the full response body.
///
/// A non-2xx status is not an error here; interpreting status codes is
/// the caller's responsibility. Network failures, timeouts, and body-read
/// failures surface verbatim as [`crate::Error::Transport`].
pub(crate) fn invoke(
    http: &Client,
    method: Method,
    url: &str,
    body: Body<'_>,
    headers: &HashMap<String, String>,
) -> Result<(u16, Vec<u8>)> {
    let mut request = http.request(method, url);

    for (name, value) in headers {
        request = request.header(name.as_str(), value.as_str());
    }

    if let Body::Form(pairs) = body {
        request = request.form(pairs);
    }

    let response = request.send()?;
    let status = response.status().as_u16();
    let data = response.bytes()?;

    Ok((status, data.to_vec()))
}
