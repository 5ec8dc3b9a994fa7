use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

pub(crate) const NAMESPACES_URL: &str =
    "/w/api.php?action=query&format=json&meta=siteinfo&siprop=namespaces&formatversion=2";

/// A MediaWiki namespace definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Namespace {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub case: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subpages: bool,
    #[serde(default)]
    pub canonical: String,
    #[serde(default)]
    pub content: bool,
    #[serde(default)]
    pub nonincludable: bool,
}

#[derive(Debug, Default, Deserialize)]
struct NamespacesResponse {
    #[serde(default)]
    query: NamespacesQuery,
}

#[derive(Debug, Default, Deserialize)]
struct NamespacesQuery {
    #[serde(default)]
    namespaces: HashMap<String, Namespace>,
}

/// Decode the siteinfo namespaces map, dropping the stringified-id keys.
/// The numeric key order carries no meaning, so the list is unordered.
pub(crate) fn normalize_namespaces(data: &[u8]) -> Result<Vec<Namespace>> {
    let response: NamespacesResponse = serde_json::from_slice(data)?;
    Ok(response.query.namespaces.into_values().collect())
}
