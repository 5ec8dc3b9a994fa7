use serde::Deserialize;

use crate::error::{Error, Result};
use crate::options::fill_template;
use crate::page_data::Slots;

pub(crate) const PAGE_WIKITEXT_URL: &str =
    "/w/api.php?action=query&format=json&prop=revisions&formatversion=2&titles={title}&rvprop=content&rvslots=main&rvlimit=1";

#[derive(Debug, Default, Deserialize)]
struct WikitextResponse {
    #[serde(default)]
    query: WikitextQuery,
}

#[derive(Debug, Default, Deserialize)]
struct WikitextQuery {
    #[serde(default)]
    pages: Vec<WikitextPage>,
}

#[derive(Debug, Default, Deserialize)]
struct WikitextPage {
    #[serde(default)]
    revisions: Vec<WikitextRevision>,
}

#[derive(Debug, Default, Deserialize)]
struct WikitextRevision {
    #[serde(default)]
    slots: Slots,
}

/// Interpolate the title into the wikitext query template; a revision id
/// pins the fetch to that revision via `rvstartid`.
pub(crate) fn page_wikitext_path(template: &str, title: &str, revision: Option<u64>) -> String {
    let encoded_title = urlencoding::encode(title);
    let mut path = fill_template(template, &[("title", encoded_title.as_ref())]);
    if let Some(rev) = revision {
        path.push_str("&rvstartid=");
        path.push_str(&rev.to_string());
    }
    path
}

/// Decode the wikitext response down to the main-slot content of the
/// first returned revision.
pub(crate) fn normalize_page_wikitext(data: &[u8]) -> Result<Vec<u8>> {
    let response: WikitextResponse = serde_json::from_slice(data)?;
    let content = response
        .query
        .pages
        .into_iter()
        .next()
        .and_then(|page| page.revisions.into_iter().next())
        .map(|revision| revision.slots.main.content)
        .ok_or(Error::EmptyResult)?;
    Ok(content.into_bytes())
}
