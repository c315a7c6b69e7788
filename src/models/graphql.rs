//! Wire shapes of the GraphQL API: request envelope, response envelope,
//! connection wrappers and the raw nodes each query selects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

/// Messages from a response body's `errors` array, if any.
pub fn graphql_error_messages(body: &Value) -> Vec<String> {
    body.get("errors")
        .cloned()
        .and_then(|errors| serde_json::from_value::<Vec<GraphQLError>>(errors).ok())
        .unwrap_or_default()
        .into_iter()
        .map(|e| e.message)
        .collect()
}

/// Connection metadata telling whether another page exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage", default)]
    pub has_next: bool,
    #[serde(rename = "endCursor", default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    pub fn new(has_next: bool, end_cursor: Option<&str>) -> Self {
        Self {
            has_next,
            end_cursor: end_cursor.map(str::to_string),
        }
    }

}

/// Decode list entries one by one so a single malformed entry is dropped
/// with a warning instead of failing its whole connection.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Option<T>>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed node");
                None
            }
        })
        .collect())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
pub struct EdgeConnection<T> {
    #[serde(default, deserialize_with = "lenient_list")]
    pub edges: Vec<Option<Edge<T>>>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: Option<T>,
    #[allow(dead_code)]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
pub struct NodeConnection<T> {
    #[serde(default, deserialize_with = "lenient_list")]
    pub nodes: Vec<Option<T>>,
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNode {
    pub name: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryNode {
    pub message_headline: Option<String>,
    pub committed_date: Option<String>,
    pub author: Option<GitActor>,
}

#[derive(Debug, Deserialize)]
pub struct GitActor {
    pub name: Option<String>,
    pub user: Option<Login>,
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub login: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub title: Option<String>,
    pub state: super::IssueState,
    pub author: Option<Login>,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LicenseInfo {
    pub name: Option<String>,
}
