use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::QueryExecutor;
use crate::error::QueryFailure;
use crate::fetcher::FetchSettings;

/// Replays queued responses in order and records the variables of each call.
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<Value, QueryFailure>>>,
    requests: Mutex<Vec<Value>>,
}

impl ScriptedExecutor {
    pub fn new(responses: Vec<Result<Value, QueryFailure>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, _document: &str, variables: &Value) -> Result<Value, QueryFailure> {
        self.requests.lock().unwrap().push(variables.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(QueryFailure::Transport {
                    cause: "no scripted response left".to_string(),
                })
            })
    }
}

pub fn settings() -> FetchSettings {
    FetchSettings {
        owner: "acme".to_string(),
        repo_name: "widget".to_string(),
        page_size: 100,
        cutoff: "2024-04-15T00:00:00Z".to_string(),
    }
}

fn page_info(cursor: Option<&str>) -> Value {
    json!({ "hasNextPage": cursor.is_some(), "endCursor": cursor })
}

/// Releases page with one edge per date; `next` is the cursor of a following page.
pub fn releases_page(dates: &[&str], next: Option<&str>) -> Value {
    let edges: Vec<Value> = dates
        .iter()
        .map(|d| json!({ "node": { "name": format!("release {}", d), "publishedAt": d }, "cursor": d }))
        .collect();
    json!({ "data": { "repository": { "releases": { "edges": edges, "pageInfo": page_info(next) } } } })
}

/// Commit history page with `(login, date)` pairs.
pub fn history_page(commits: &[(&str, &str)], next: Option<&str>) -> Value {
    let nodes: Vec<Value> = commits
        .iter()
        .map(|(login, date)| {
            json!({
                "messageHeadline": format!("commit by {}", login),
                "committedDate": date,
                "author": { "name": login.to_uppercase(), "user": { "login": login } }
            })
        })
        .collect();
    json!({ "data": { "repository": { "defaultBranchRef": { "target": {
        "history": { "nodes": nodes, "pageInfo": page_info(next) }
    }}}}})
}

pub fn issues_page(dates: &[&str], next: Option<&str>) -> Value {
    let nodes: Vec<Value> = dates
        .iter()
        .map(|d| json!({ "title": format!("issue {}", d), "state": "OPEN", "author": { "login": "carol" }, "createdAt": d }))
        .collect();
    json!({ "data": { "repository": { "issues": { "nodes": nodes, "pageInfo": page_info(next) } } } })
}
