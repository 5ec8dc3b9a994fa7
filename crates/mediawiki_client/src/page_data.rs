use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

pub(crate) const PAGE_DATA_URL: &str = "/w/api.php";

const DEFAULT_PROP: &str =
    "info|categories|revisions|templates|wbentityusage|pageprops|redirects|flagged";
const DEFAULT_RVPROP: &str = "comment|oresscores|content|ids|timestamp|tags|user|userid|flags";

/// Optional parameters for the bulk page-data query.
#[derive(Debug, Clone)]
pub struct PageDataOptions {
    /// Number of revisions fetched per page. Defaults to 1.
    pub revisions_limit: u32,
    /// Extra `rvprop` values, appended to the default list.
    pub revision_props: Vec<String>,
}

impl Default for PageDataOptions {
    fn default() -> Self {
        Self {
            revisions_limit: 1,
            revision_props: Vec::new(),
        }
    }
}

/// Aggregate page record from the Action API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageData {
    #[serde(rename = "pageid", default)]
    pub page_id: i64,
    #[serde(default)]
    pub ns: i32,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "contentmodel", default)]
    pub content_model: String,
    #[serde(rename = "pagelanguage", default)]
    pub page_language: String,
    #[serde(rename = "pagelanguagehtmlcode", default)]
    pub page_language_html_code: String,
    #[serde(rename = "pagelanguagedir", default)]
    pub page_language_dir: String,
    #[serde(default)]
    pub touched: String,
    #[serde(rename = "lastrevid", default)]
    pub last_rev_id: i64,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub protection: Vec<Protection>,
    #[serde(rename = "restrictiontypes", default)]
    pub restriction_types: Vec<String>,
    #[serde(rename = "fullurl", default)]
    pub full_url: String,
    #[serde(rename = "editurl", default)]
    pub edit_url: String,
    #[serde(rename = "canonicalurl", default)]
    pub canonical_url: String,
    #[serde(rename = "displaytitle", default)]
    pub display_title: String,
    #[serde(default)]
    pub categories: Vec<PageLink>,
    #[serde(default)]
    pub revisions: Vec<PageDataRevision>,
    #[serde(default)]
    pub templates: Vec<PageLink>,
    #[serde(rename = "wbentityusage", default)]
    pub wb_entity_usage: HashMap<String, EntityUsage>,
    #[serde(rename = "pageprops", default)]
    pub page_props: PageProps,
    #[serde(default)]
    pub redirects: Vec<RedirectLink>,
    /// FlaggedRevs extension state. The shape depends on the wiki's
    /// deployment, so it is carried verbatim.
    #[serde(default)]
    pub flagged: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Protection {
    #[serde(rename = "type", default)]
    pub protection_type: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub expiry: String,
}

/// Namespaced title reference (categories, templates).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLink {
    #[serde(default)]
    pub ns: i32,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectLink {
    #[serde(rename = "pageid", default)]
    pub page_id: i64,
    #[serde(default)]
    pub ns: i32,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityUsage {
    #[serde(default)]
    pub aspects: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageProps {
    #[serde(rename = "wikibase_item", default)]
    pub wikibase_item: String,
}

/// One revision nested in a [`PageData`] record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageDataRevision {
    #[serde(rename = "revid", default)]
    pub rev_id: i64,
    #[serde(rename = "parentid", default)]
    pub parent_id: i64,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub user: String,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub slots: Slots,
    /// ORES score payload. Its shape varies per deployment, so it is
    /// carried verbatim.
    #[serde(rename = "oresscores", default)]
    pub ores_scores: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Slots {
    #[serde(default)]
    pub main: MainSlot,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MainSlot {
    #[serde(rename = "contentmodel", default)]
    pub content_model: String,
    #[serde(rename = "contentformat", default)]
    pub content_format: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageDataResponse {
    #[serde(default)]
    query: PageDataQuery,
}

#[derive(Debug, Default, Deserialize)]
struct PageDataQuery {
    #[serde(default)]
    normalized: Vec<TitleMapping>,
    #[serde(default)]
    redirects: Vec<TitleMapping>,
    #[serde(default)]
    pages: Vec<PageData>,
}

#[derive(Debug, Default, Deserialize)]
struct TitleMapping {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
}

/// Build the form body for the bulk page-data query. Caller-supplied
/// revision props append to the default `rvprop` list rather than
/// replacing it.
pub(crate) fn page_data_form(titles: &[String], options: &PageDataOptions) -> Vec<(&'static str, String)> {
    let mut rvprop = DEFAULT_RVPROP.to_string();
    if !options.revision_props.is_empty() {
        rvprop.push('|');
        rvprop.push_str(&options.revision_props.join("|"));
    }

    vec![
        ("action", "query".to_string()),
        ("format", "json".to_string()),
        ("formatversion", "2".to_string()),
        ("prop", DEFAULT_PROP.to_string()),
        ("rvprop", rvprop),
        ("rvslots", "main".to_string()),
        ("rvlimit", options.revisions_limit.to_string()),
        ("inprop", "displaytitle|protection|url|watchers".to_string()),
        ("ppprop", "wikibase_item".to_string()),
        ("redirects", "1".to_string()),
        ("titles", titles.join("|")),
    ]
}

/// Decode the bulk page-data response and re-key the pages by the
/// originally requested titles.
///
/// The server may report a page under a normalized title and/or behind a
/// redirect chain; each requested title is resolved forward through the
/// `normalized` then `redirects` mappings, and the resulting server title
/// maps back to the request string. Pages flagged missing are dropped, as
/// are pages that correspond to no requested title.
pub(crate) fn normalize_pages_data(titles: &[String], data: &[u8]) -> Result<HashMap<String, PageData>> {
    let response: PageDataResponse = serde_json::from_slice(data)?;
    let PageDataQuery {
        normalized,
        redirects,
        pages,
    } = response.query;

    let normalized: HashMap<&str, &str> = normalized
        .iter()
        .map(|mapping| (mapping.from.as_str(), mapping.to.as_str()))
        .collect();
    let redirected: HashMap<&str, &str> = redirects
        .iter()
        .map(|mapping| (mapping.from.as_str(), mapping.to.as_str()))
        .collect();

    let mut original_by_server_title: HashMap<String, String> = HashMap::new();
    for title in titles {
        let mut resolved = title.as_str();
        if let Some(to) = normalized.get(resolved) {
            resolved = to;
        }
        // Follow the redirect chain; the hop bound guards against cycles.
        let mut hops = 0;
        while let Some(to) = redirected.get(resolved) {
            resolved = to;
            hops += 1;
            if hops > redirected.len() {
                break;
            }
        }
        original_by_server_title
            .entry(resolved.to_string())
            .or_insert_with(|| title.clone());
    }

    let mut result = HashMap::new();
    for page in pages {
        if page.missing {
            continue;
        }
        if let Some(original) = original_by_server_title.get(&page.title) {
            result.insert(original.clone(), page);
        }
    }

    Ok(result)
}
