use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

pub(crate) const USER_URL: &str = "/w/api.php";

const DEFAULT_USPROP: &str = "groups|editcount|groupmemberships|registration|emailable";

/// A MediaWiki user account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "editcount", default)]
    pub edit_count: i64,
    /// ISO 8601 registration time; absent for some old accounts.
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(rename = "groupmemberships", default)]
    pub group_memberships: Vec<Value>,
    #[serde(default)]
    pub emailable: bool,
    #[serde(default)]
    pub missing: bool,
}

#[derive(Debug, Default, Deserialize)]
struct UserResponse {
    #[serde(default)]
    query: UserQuery,
}

#[derive(Debug, Default, Deserialize)]
struct UserQuery {
    #[serde(default)]
    users: Vec<User>,
}

/// Build the form body for the users query; ids are pipe-joined.
pub(crate) fn users_form(ids: &[i64]) -> Vec<(&'static str, String)> {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("|");

    vec![
        ("action", "query".to_string()),
        ("format", "json".to_string()),
        ("formatversion", "2".to_string()),
        ("list", "users".to_string()),
        ("usprop", DEFAULT_USPROP.to_string()),
        ("ususerids", joined),
    ]
}

/// Decode the users response, keyed by user id. Ids flagged missing never
/// appear in the result.
pub(crate) fn normalize_users(data: &[u8]) -> Result<HashMap<i64, User>> {
    let response: UserResponse = serde_json::from_slice(data)?;
    Ok(response
        .query
        .users
        .into_iter()
        .filter(|user| !user.missing)
        .map(|user| (user.user_id, user))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS_BODY: &str = r#"{
        "batchcomplete": true,
        "query": {
            "users": [
                {
                    "userid": 100,
                    "name": "Ninja",
                    "editcount": 2,
                    "registration": "2021-04-02T13:43:05Z",
                    "groups": ["*", "user", "autoconfirmed"],
                    "groupmemberships": [],
                    "emailable": false
                },
                {
                    "userid": 999,
                    "missing": true
                }
            ]
        }
    }"#;

    #[test]
    fn form_pipe_joins_ids() {
        let form = users_form(&[100, 999]);
        let ids = &form.iter().find(|(name, _)| *name == "ususerids").unwrap().1;
        assert_eq!(ids, "100|999");

        let usprop = &form.iter().find(|(name, _)| *name == "usprop").unwrap().1;
        assert!(usprop.contains("editcount"));
    }

    #[test]
    fn missing_users_filtered_from_result() {
        let users = normalize_users(USERS_BODY.as_bytes()).expect("normalize");

        assert_eq!(users.len(), 1);
        assert!(users.contains_key(&100));
        assert!(!users.contains_key(&999));

        let user = &users[&100];
        assert_eq!(user.name, "Ninja");
        assert_eq!(user.edit_count, 2);
        assert_eq!(user.registration.as_deref(), Some("2021-04-02T13:43:05Z"));
        assert_eq!(user.groups.len(), 3);
    }

    #[test]
    fn absent_registration_decodes_as_none() {
        let body = br#"{"query": {"users": [{"userid": 7, "name": "Old"}]}}"#;
        let users = normalize_users(body).expect("normalize");
        assert!(users[&7].registration.is_none());
    }
}
