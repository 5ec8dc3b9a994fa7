use crate::namespaces::NAMESPACES_URL;
use crate::page_data::PAGE_DATA_URL;
use crate::page_meta::{PAGE_HTML_URL, PAGE_META_URL};
use crate::page_revisions::PAGE_REVISIONS_URL;
use crate::page_wikitext::PAGE_WIKITEXT_URL;
use crate::sitematrix::SITEMATRIX_URL;
use crate::user::USER_URL;

/// Per-endpoint URL templates, appended to the client's base URL.
///
/// Defaults point at the real-world REST (`/api/rest_v1/...`) and Action
/// API (`/w/api.php`) paths. Each template is independently overridable,
/// which is how the tests point a client at fixture routes. Query-string
/// templates use `{title}`, `{limit}`, and `{dir}` placeholders filled at
/// call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub page_meta_url: String,
    pub page_html_url: String,
    pub page_wikitext_url: String,
    pub page_revisions_url: String,
    pub sitematrix_url: String,
    pub namespaces_url: String,
    pub page_data_url: String,
    pub user_url: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            page_meta_url: PAGE_META_URL.to_string(),
            page_html_url: PAGE_HTML_URL.to_string(),
            page_wikitext_url: PAGE_WIKITEXT_URL.to_string(),
            page_revisions_url: PAGE_REVISIONS_URL.to_string(),
            sitematrix_url: SITEMATRIX_URL.to_string(),
            namespaces_url: NAMESPACES_URL.to_string(),
            page_data_url: PAGE_DATA_URL.to_string(),
            user_url: USER_URL.to_string(),
        }
    }
}

/// Substitute `{name}` placeholders in a URL template.
pub(crate) fn fill_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut filled = template.to_string();
    for (name, value) in pairs {
        filled = filled.replace(&format!("{{{name}}}"), value);
    }
    filled
}
