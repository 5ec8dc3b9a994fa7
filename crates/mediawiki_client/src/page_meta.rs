use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};

pub(crate) const PAGE_META_URL: &str = "/api/rest_v1/page/title/";
pub(crate) const PAGE_HTML_URL: &str = "/api/rest_v1/page/html/";

/// REST summary of one page revision.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub page_id: i64,
    #[serde(default)]
    pub rev: i64,
    #[serde(default)]
    pub tid: String,
    #[serde(default)]
    pub namespace: i32,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub user_text: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<Value>,
    #[serde(default)]
    pub page_language: String,
    #[serde(default)]
    pub redirect: bool,
}

#[derive(Debug, Default, Deserialize)]
struct PageMetaResponse {
    #[serde(default)]
    items: Vec<PageMeta>,
}

/// Build the REST path for a title-keyed page endpoint, appending the
/// percent-encoded title and an optional revision path segment.
pub(crate) fn rest_page_path(template: &str, title: &str, revision: Option<u64>) -> String {
    let mut path = format!("{template}{}", urlencoding::encode(title));
    if let Some(rev) = revision {
        path.push('/');
        path.push_str(&rev.to_string());
    }
    path
}

/// Decode a page summary response. An absent or empty `items` list is the
/// `EmptyResult` condition, not a decode error.
pub(crate) fn normalize_page_meta(data: &[u8]) -> Result<PageMeta> {
    let response: PageMetaResponse = serde_json::from_slice(data)?;
    response.items.into_iter().next().ok_or(Error::EmptyResult)
}
