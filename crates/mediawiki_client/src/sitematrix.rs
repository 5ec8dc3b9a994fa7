use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

pub(crate) const SITEMATRIX_URL: &str = "/w/api.php?action=sitematrix&format=json&formatversion=2";

/// One wiki site inside a [`Project`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "dbname", default)]
    pub db_name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "sitename", default)]
    pub site_name: String,
    #[serde(default)]
    pub closed: bool,
}

/// One wiki language edition and its sites.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: Vec<Site>,
    #[serde(default)]
    pub dir: String,
    #[serde(rename = "localname", default)]
    pub local_name: String,
}

/// Non-standard wiki project (commons, meta, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Special {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "dbname", default)]
    pub db_name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub lang: String,
    #[serde(rename = "sitename", default)]
    pub site_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub fishbowl: bool,
    #[serde(default)]
    pub nonglobal: bool,
}

/// The registry of all Wikimedia-family projects.
///
/// `count` is the server-reported figure and is independent of how many
/// projects were actually parsed. Project order follows the source map
/// and is not guaranteed to be stable.
#[derive(Debug, Clone, Default)]
pub struct Sitematrix {
    pub count: i64,
    pub specials: Vec<Special>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Default, Deserialize)]
struct SitematrixWrapperResponse {
    #[serde(default)]
    sitematrix: SitematrixWrapper,
}

#[derive(Debug, Default, Deserialize)]
struct SitematrixWrapper {
    #[serde(default)]
    count: i64,
    #[serde(default)]
    specials: Vec<Special>,
}

#[derive(Debug, Default, Deserialize)]
struct SitematrixProjectsResponse {
    #[serde(default)]
    sitematrix: HashMap<String, Value>,
}

/// Decode the site-matrix payload.
///
/// The raw object mixes a numerically-keyed map of projects with the two
/// reserved keys `count` and `specials` at the same nesting level, so the
/// payload is decoded twice: once for the fixed-schema wrapper, once for
/// the open-ended map with the reserved keys skipped.
pub(crate) fn normalize_sitematrix(data: &[u8]) -> Result<Sitematrix> {
    let wrapper: SitematrixWrapperResponse = serde_json::from_slice(data)?;
    let by_key: SitematrixProjectsResponse = serde_json::from_slice(data)?;

    let mut projects = Vec::new();
    for (key, value) in by_key.sitematrix {
        if key == "count" || key == "specials" {
            continue;
        }
        projects.push(serde_json::from_value::<Project>(value)?);
    }

    Ok(Sitematrix {
        count: wrapper.sitematrix.count,
        specials: wrapper.sitematrix.specials,
        projects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_count_specials_and_numeric_projects() {
        let body = br#"{
            "sitematrix": {
                "count": 2,
                "0": {
                    "code": "en",
                    "name": "English",
                    "dir": "ltr",
                    "localname": "English",
                    "site": [{
                        "url": "https://en.wikipedia.org",
                        "dbname": "enwiki",
                        "code": "wiki",
                        "sitename": "Wikipedia"
                    }]
                },
                "specials": []
            }
        }"#;
        let matrix = normalize_sitematrix(body).expect("normalize");

        assert_eq!(matrix.count, 2);
        assert_eq!(matrix.projects.len(), 1);
        assert!(matrix.specials.is_empty());

        let project = &matrix.projects[0];
        assert_eq!(project.code, "en");
        assert_eq!(project.site.len(), 1);
        assert_eq!(project.site[0].db_name, "enwiki");
    }

    #[test]
    fn includes_every_non_reserved_entry_once() {
        // A str literal here: byte strings cannot hold the non-ASCII
        // project name.
        let body = r#"{
            "sitematrix": {
                "count": 3,
                "0": {"code": "en", "name": "English"},
                "1": {"code": "de", "name": "Deutsch"},
                "2": {"code": "fr", "name": "français"},
                "specials": [{
                    "url": "https://commons.wikimedia.org",
                    "dbname": "commonswiki",
                    "code": "commons",
                    "lang": "commons",
                    "sitename": "Wikimedia Commons",
                    "fishbowl": true
                }]
            }
        }"#;
        let matrix = normalize_sitematrix(body.as_bytes()).expect("normalize");

        assert_eq!(matrix.count, 3);

        let french = matrix
            .projects
            .iter()
            .find(|project| project.code == "fr")
            .expect("fr project");
        assert_eq!(french.name, "français");
        let mut codes: Vec<&str> = matrix
            .projects
            .iter()
            .map(|project| project.code.as_str())
            .collect();
        codes.sort_unstable();
        assert_eq!(codes, ["de", "en", "fr"]);

        assert_eq!(matrix.specials.len(), 1);
        assert!(matrix.specials[0].fishbowl);
    }

    #[test]
    fn count_reflects_server_value_not_parsed_projects() {
        let body = br#"{"sitematrix": {"count": 67, "specials": []}}"#;
        let matrix = normalize_sitematrix(body).expect("normalize");
        assert_eq!(matrix.count, 67);
        assert!(matrix.projects.is_empty());
    }
}
