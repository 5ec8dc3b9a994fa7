use serde::Deserialize;

use crate::error::{Error, Result};
use crate::options::fill_template;

pub(crate) const PAGE_REVISIONS_URL: &str =
    "/w/api.php?action=query&format=json&formatversion=2&prop=revisions&rvlimit={limit}&rvdir={dir}&titles={title}";

/// Direction in which the revisions list is enumerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevisionOrdering {
    /// Newest revision first (the API default).
    #[default]
    Older,
    /// Oldest revision first.
    Newer,
}

impl RevisionOrdering {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Older => "older",
            Self::Newer => "newer",
        }
    }
}

/// Optional parameters for the revisions query.
#[derive(Debug, Clone, Default)]
pub struct PageRevisionsOptions {
    pub order: RevisionOrdering,
    /// Explicit `rvprop` values; when empty the API default applies.
    pub props: Vec<String>,
}

/// Standalone revision record from the revisions endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Revision {
    #[serde(rename = "revid", default)]
    pub rev_id: i64,
    #[serde(rename = "parentid", default)]
    pub parent_id: i64,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub anon: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RevisionsResponse {
    #[serde(default)]
    query: RevisionsQuery,
}

#[derive(Debug, Default, Deserialize)]
struct RevisionsQuery {
    #[serde(default)]
    pages: Vec<RevisionsPage>,
}

#[derive(Debug, Default, Deserialize)]
struct RevisionsPage {
    #[serde(default)]
    revisions: Vec<Revision>,
}

/// Interpolate title, limit, and direction into the revisions query
/// template; extra props are appended as an `rvprop` parameter.
pub(crate) fn page_revisions_path(
    template: &str,
    title: &str,
    limit: u32,
    options: &PageRevisionsOptions,
) -> String {
    let limit = limit.to_string();
    let encoded_title = urlencoding::encode(title);
    let mut path = fill_template(
        template,
        &[
            ("limit", limit.as_str()),
            ("dir", options.order.as_str()),
            ("title", encoded_title.as_ref()),
        ],
    );
    if !options.props.is_empty() {
        path.push_str("&rvprop=");
        path.push_str(&urlencoding::encode(&options.props.join("|")));
    }
    path
}

/// Decode the revisions response. A response with no matching page is the
/// `EmptyResult` condition; a matching page with zero revisions is a
/// valid empty list (new, unedited page).
pub(crate) fn normalize_page_revisions(data: &[u8]) -> Result<Vec<Revision>> {
    let response: RevisionsResponse = serde_json::from_slice(data)?;
    let page = response
        .query
        .pages
        .into_iter()
        .next()
        .ok_or(Error::EmptyResult)?;
    Ok(page.revisions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_interpolates_all_placeholders() {
        let path = page_revisions_path(
            PAGE_REVISIONS_URL,
            "Main Page",
            10,
            &PageRevisionsOptions::default(),
        );
        assert!(path.contains("rvlimit=10"));
        assert!(path.contains("rvdir=older"));
        assert!(path.ends_with("titles=Main%20Page"));
        assert!(!path.contains('{'));
    }

    #[test]
    fn path_appends_encoded_props() {
        let options = PageRevisionsOptions {
            order: RevisionOrdering::Newer,
            props: vec!["ids".to_string(), "user".to_string()],
        };
        let path = page_revisions_path(PAGE_REVISIONS_URL, "X", 2, &options);
        assert!(path.contains("rvdir=newer"));
        assert!(path.ends_with("&rvprop=ids%7Cuser"));
    }

    #[test]
    fn normalize_returns_ordered_revisions() {
        let body = br#"{
            "batchcomplete": true,
            "query": {
                "pages": [{
                    "pageid": 1,
                    "title": "Test",
                    "revisions": [
                        {"revid": 3, "parentid": 2, "user": "Second", "timestamp": "2021-01-02T00:00:00Z"},
                        {"revid": 2, "parentid": 1, "minor": true, "user": "First", "timestamp": "2021-01-01T00:00:00Z", "anon": true}
                    ]
                }]
            }
        }"#;
        let revisions = normalize_page_revisions(body).expect("normalize");
        assert_eq!(revisions.len(), 2);
        assert_eq!(revisions[0].rev_id, 3);
        assert_eq!(revisions[1].rev_id, 2);
        assert!(revisions[1].minor);
        assert!(revisions[1].anon);

        // Decoding is deterministic over the same payload.
        let again = normalize_page_revisions(body).expect("normalize");
        assert_eq!(revisions, again);
    }

    #[test]
    fn unedited_page_yields_empty_list_not_error() {
        let body = br#"{"query": {"pages": [{"pageid": 1, "title": "Fresh"}]}}"#;
        let revisions = normalize_page_revisions(body).expect("normalize");
        assert!(revisions.is_empty());
    }

    #[test]
    fn absent_page_is_empty_result() {
        let err = normalize_page_revisions(br#"{"query": {"pages": []}}"#).unwrap_err();
        assert!(matches!(err, Error::EmptyResult));
    }
}
