use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;

use crate::error::{Error, Result};
use crate::namespaces::{Namespace, normalize_namespaces};
use crate::options::Options;
use crate::page_data::{PageData, PageDataOptions, normalize_pages_data, page_data_form};
use crate::page_meta::{PageMeta, normalize_page_meta, rest_page_path};
use crate::page_revisions::{
    PageRevisionsOptions, Revision, normalize_page_revisions, page_revisions_path,
};
use crate::page_wikitext::{normalize_page_wikitext, page_wikitext_path};
use crate::req::{Body, invoke};
use crate::sitematrix::{Sitematrix, normalize_sitematrix};
use crate::user::{User, normalize_users, users_form};

/// Wikimedia API client.
///
/// Holds no per-call state, so one instance may be shared across threads;
/// configuration is treated as immutable after construction.
pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
    headers: HashMap<String, String>,
    options: Options,
}

impl Client {
    /// Create a client with default options against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(base_url).build()
    }

    /// Start a fluent builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let (status, data) = invoke(&self.http, Method::GET, &url, Body::None, &self.headers)?;
        check_status(status, data)
    }

    fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        let (status, data) = invoke(&self.http, Method::POST, &url, Body::Form(form), &self.headers)?;
        check_status(status, data)
    }

    /// Get REST summary metadata for a page.
    pub fn page_meta(&self, title: &str) -> Result<PageMeta> {
        let path = rest_page_path(&self.options.page_meta_url, title, None);
        let data = self.get(&path)?;
        normalize_page_meta(&data)
    }

    /// Get the rendered HTML of a page, optionally at a specific revision.
    pub fn page_html(&self, title: &str, revision: Option<u64>) -> Result<Vec<u8>> {
        let path = rest_page_path(&self.options.page_html_url, title, revision);
        self.get(&path)
    }

    /// Get the raw wikitext of a page, optionally at a specific revision.
    pub fn page_wikitext(&self, title: &str, revision: Option<u64>) -> Result<Vec<u8>> {
        let path = page_wikitext_path(&self.options.page_wikitext_url, title, revision);
        let data = self.get(&path)?;
        normalize_page_wikitext(&data)
    }

    /// List up to `limit` revisions of a page, newest first by default.
    /// An unedited page yields an empty list.
    pub fn page_revisions(
        &self,
        title: &str,
        limit: u32,
        options: PageRevisionsOptions,
    ) -> Result<Vec<Revision>> {
        let path = page_revisions_path(&self.options.page_revisions_url, title, limit, &options);
        let data = self.get(&path)?;
        normalize_page_revisions(&data)
    }

    /// Get Action API page data for a batch of titles.
    ///
    /// The result is keyed by the titles as requested; server-side title
    /// normalization and redirects are resolved back to the request
    /// strings, and missing pages are dropped.
    pub fn pages_data(
        &self,
        titles: &[String],
        options: PageDataOptions,
    ) -> Result<HashMap<String, PageData>> {
        let form = page_data_form(titles, &options);
        let data = self.post_form(&self.options.page_data_url, &form)?;
        normalize_pages_data(titles, &data)
    }

    /// Get Action API page data for one title. Returns
    /// [`Error::PageNotFound`] when the page is missing.
    pub fn page_data(&self, title: &str, options: PageDataOptions) -> Result<PageData> {
        let titles = vec![title.to_string()];
        let mut pages = self.pages_data(&titles, options)?;
        pages.remove(title).ok_or(Error::PageNotFound)
    }

    /// Get the matrix of all known Wikimedia projects.
    pub fn sitematrix(&self) -> Result<Sitematrix> {
        let data = self.get(&self.options.sitematrix_url)?;
        normalize_sitematrix(&data)
    }

    /// List the wiki's namespaces.
    pub fn namespaces(&self) -> Result<Vec<Namespace>> {
        let data = self.get(&self.options.namespaces_url)?;
        normalize_namespaces(&data)
    }

    /// Get users by id, keyed by id. Missing ids are dropped from the
    /// result.
    pub fn users(&self, ids: &[i64]) -> Result<HashMap<i64, User>> {
        let form = users_form(ids);
        let data = self.post_form(&self.options.user_url, &form)?;
        normalize_users(&data)
    }

    /// Get one user by id. Returns [`Error::UserNotFound`] when the id is
    /// missing.
    pub fn user(&self, id: i64) -> Result<User> {
        let mut users = self.users(&[id])?;
        users.remove(&id).ok_or(Error::UserNotFound)
    }
}

fn check_status(status: u16, data: Vec<u8>) -> Result<Vec<u8>> {
    if !(200..300).contains(&status) {
        return Err(Error::HttpStatus {
            status,
            body: String::from_utf8_lossy(&data).into_owned(),
        });
    }
    Ok(data)
}

/// Fluent construction of a [`Client`].
pub struct ClientBuilder {
    base_url: String,
    http: Option<reqwest::blocking::Client>,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
    options: Options,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: None,
            timeout: None,
            headers: HashMap::new(),
            options: Options::default(),
        }
    }

    /// Override the default endpoint URL templates.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Use a caller-supplied HTTP client. Takes precedence over
    /// [`ClientBuilder::timeout`].
    pub fn http_client(mut self, http: reqwest::blocking::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Request timeout for the default HTTP client. A timeout aborts the
    /// in-flight request and surfaces as [`Error::Transport`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Headers sent with every request (auth tokens, user agent).
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn build(self) -> Result<Client> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = reqwest::blocking::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(Client {
            base_url: self.base_url,
            http,
            headers: self.headers,
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_options_and_headers() {
        let options = Options {
            page_data_url: "/page-data".to_string(),
            ..Options::default()
        };
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), "Bearer token".to_string());

        let client = Client::builder("https://en.wikipedia.org")
            .options(options)
            .headers(headers)
            .timeout(Duration::from_secs(5))
            .build()
            .expect("build client");

        assert_eq!(client.base_url, "https://en.wikipedia.org");
        assert_eq!(client.options.page_data_url, "/page-data");
        assert_eq!(client.headers["Authorization"], "Bearer token");
        assert_eq!(client.options.page_meta_url, "/api/rest_v1/page/title/");
    }

    #[test]
    fn non_success_status_formats_error() {
        let err = check_status(404, b"nope".to_vec()).unwrap_err();
        match err {
            Error::HttpStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "nope");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(check_status(204, Vec::new()).is_ok());
    }
}
