use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::UNKNOWN_AUTHOR;
use crate::models::graphql::{EdgeConnection, HistoryNode, IssueNode, NodeConnection, ReleaseNode};
use crate::models::{CommitRecord, ContributorMap, IssueRecord, PageInfo, Release};

const RELEASES_PATH: &str = "/data/repository/releases";
const HISTORY_PATH: &str = "/data/repository/defaultBranchRef/target/history";
const ISSUES_PATH: &str = "/data/repository/issues";

/// Items taken from one page and where to go next.
///
/// `next_page: None` stops pagination regardless of what the server said.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult<T> {
    pub items: Vec<T>,
    pub next_page: Option<PageInfo>,
}

impl<T> ExtractionResult<T> {
    pub fn new(items: Vec<T>, next_page: Option<PageInfo>) -> Self {
        Self { items, next_page }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }
}

/// Maps one decoded page to its items. Pure: no I/O, no state between pages.
pub trait PageExtractor {
    type Item;

    fn extract(&self, page: &Value) -> ExtractionResult<Self::Item>;
}

/// Decode the connection at `path`. Absent or null means an empty repository
/// (no releases, no default branch); an undecodable one is treated the same.
fn connection<T: DeserializeOwned>(page: &Value, path: &str) -> Option<T> {
    let raw = page.pointer(path).filter(|v| !v.is_null())?;
    match serde_json::from_value(raw.clone()) {
        Ok(conn) => Some(conn),
        Err(e) => {
            tracing::warn!(path, error = %e, "Unexpected connection shape, treating as empty");
            None
        }
    }
}

/// Releases newest first; stops at the first one published before `cutoff`.
#[derive(Debug, Clone)]
pub struct ReleasesExtractor {
    pub cutoff: String,
}

impl ReleasesExtractor {
    pub fn new(cutoff: impl Into<String>) -> Self {
        Self {
            cutoff: cutoff.into(),
        }
    }
}

impl PageExtractor for ReleasesExtractor {
    type Item = Release;

    fn extract(&self, page: &Value) -> ExtractionResult<Release> {
        let Some(conn) = connection::<EdgeConnection<ReleaseNode>>(page, RELEASES_PATH) else {
            return ExtractionResult::empty();
        };

        let mut releases = Vec::new();
        for node in conn.edges.into_iter().flatten().filter_map(|edge| edge.node) {
            let Some(published_at) = node.published_at.as_deref() else {
                continue;
            };
            if published_at < self.cutoff.as_str() {
                tracing::debug!(published_at, "Reached releases older than the cutoff, stopping pagination");
                return ExtractionResult::new(releases, None);
            }
            releases.push(Release::new(node.name.as_deref(), published_at));
        }

        ExtractionResult::new(releases, conn.page_info)
    }
}

/// Every commit in the page. The `since` variable already bounds the window.
#[derive(Debug, Clone, Default)]
pub struct CommitsExtractor;

impl PageExtractor for CommitsExtractor {
    type Item = CommitRecord;

    fn extract(&self, page: &Value) -> ExtractionResult<CommitRecord> {
        let Some(conn) = connection::<NodeConnection<HistoryNode>>(page, HISTORY_PATH) else {
            return ExtractionResult::empty();
        };

        let commits = conn
            .nodes
            .into_iter()
            .flatten()
            .map(|node| CommitRecord {
                message: node.message_headline.unwrap_or_default(),
                date: node.committed_date.unwrap_or_default(),
                author: node
                    .author
                    .and_then(|a| a.name)
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            })
            .collect();

        ExtractionResult::new(commits, conn.page_info)
    }
}

/// Latest commit date per author login within one page of history.
///
/// Always yields exactly one map; merging across pages is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct ContributorsExtractor;

impl PageExtractor for ContributorsExtractor {
    type Item = ContributorMap;

    fn extract(&self, page: &Value) -> ExtractionResult<ContributorMap> {
        let mut contributors = ContributorMap::new();
        let Some(conn) = connection::<NodeConnection<HistoryNode>>(page, HISTORY_PATH) else {
            return ExtractionResult::new(vec![contributors], None);
        };

        for node in conn.nodes.into_iter().flatten() {
            let login = node
                .author
                .and_then(|a| a.user)
                .and_then(|u| u.login)
                .filter(|l| !l.is_empty());
            let date = node.committed_date.filter(|d| !d.is_empty());
            if let (Some(login), Some(date)) = (login, date) {
                contributors.record(&login, &date);
            }
        }

        ExtractionResult::new(vec![contributors], conn.page_info)
    }
}

/// Issues newest first; stops at the first one created before `cutoff`
/// because the issues query has no server-side date filter.
#[derive(Debug, Clone)]
pub struct IssuesExtractor {
    pub cutoff: String,
}

impl IssuesExtractor {
    pub fn new(cutoff: impl Into<String>) -> Self {
        Self {
            cutoff: cutoff.into(),
        }
    }
}

impl PageExtractor for IssuesExtractor {
    type Item = IssueRecord;

    fn extract(&self, page: &Value) -> ExtractionResult<IssueRecord> {
        let Some(conn) = connection::<NodeConnection<IssueNode>>(page, ISSUES_PATH) else {
            return ExtractionResult::empty();
        };

        let mut issues = Vec::new();
        for node in conn.nodes.into_iter().flatten() {
            let Some(created_at) = node.created_at else {
                continue;
            };
            if created_at.as_str() < self.cutoff.as_str() {
                tracing::debug!(%created_at, "Reached issues older than the cutoff, stopping pagination");
                return ExtractionResult::new(issues, None);
            }
            issues.push(IssueRecord {
                title: node.title.unwrap_or_default(),
                state: node.state,
                author: node
                    .author
                    .and_then(|a| a.login)
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                created_at,
            });
        }

        ExtractionResult::new(issues, conn.page_info)
    }
}
