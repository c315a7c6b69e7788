//! Resource fetchers: one call site per repository metric.

use serde_json::{json, Map, Value};

use crate::client::QueryExecutor;
use crate::config::Config;
use crate::constants::*;
use crate::error::MetricsResult;
use crate::models::graphql::{LicenseInfo, TreeEntry};
use crate::models::{CommitRecord, ContributorMap, IssueRecord, Release};
use crate::pagination::{
    CommitsExtractor, ContributorsExtractor, FetchOutcome, IssuesExtractor, PaginationEngine,
    ReleasesExtractor,
};

/// Everything a fetcher needs to know about the target, fixed for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub owner: String,
    pub repo_name: String,
    pub page_size: u32,
    /// Oldest timestamp to keep, `%Y-%m-%dT%H:%M:%SZ`.
    pub cutoff: String,
}

impl FetchSettings {
    pub fn from_config(config: &Config) -> MetricsResult<Self> {
        Ok(Self {
            owner: config.owner().to_string(),
            repo_name: config.repo_name().to_string(),
            page_size: config.page_size(),
            cutoff: config.cutoff()?,
        })
    }
}

pub struct MetricsFetcher<E: QueryExecutor> {
    executor: E,
    settings: FetchSettings,
}

impl<E: QueryExecutor> MetricsFetcher<E> {
    pub fn new(executor: E, settings: FetchSettings) -> Self {
        Self { executor, settings }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn repo_variables(&self) -> Map<String, Value> {
        let mut variables = Map::new();
        variables.insert("owner".to_string(), json!(self.settings.owner));
        variables.insert("name".to_string(), json!(self.settings.repo_name));
        variables
    }

    fn page_variables(&self) -> Map<String, Value> {
        let mut variables = self.repo_variables();
        variables.insert("first".to_string(), json!(self.settings.page_size));
        variables
    }

    fn history_variables(&self) -> Map<String, Value> {
        let mut variables = self.page_variables();
        variables.insert("since".to_string(), json!(self.settings.cutoff));
        variables
    }

    fn engine(&self) -> PaginationEngine<'_, E> {
        PaginationEngine::new(&self.executor)
    }

    /// Names of the `.md` files at the root of the default branch.
    pub async fn get_root_md_files(&self) -> FetchOutcome<Vec<String>> {
        tracing::info!("Checking root .md files...");
        let variables = Value::Object(self.repo_variables());
        let response = match self.executor.execute(ROOT_FILES_QUERY, &variables).await {
            Ok(response) => response,
            Err(reason) => {
                tracing::error!(error = %reason, "Could not list root files");
                return FetchOutcome::Truncated {
                    data: Vec::new(),
                    reason,
                };
            }
        };

        let entries: Vec<TreeEntry> = response
            .pointer("/data/repository/object/entries")
            .cloned()
            .and_then(|entries| serde_json::from_value(entries).ok())
            .unwrap_or_default();

        let md_files: Vec<String> = entries
            .into_iter()
            .map(|entry| entry.name)
            .filter(|name| name.ends_with(".md"))
            .collect();

        if md_files.is_empty() {
            tracing::warn!("No .md files found in the repository root");
        } else {
            tracing::info!(count = md_files.len(), "Found .md files in root");
        }
        FetchOutcome::Complete(md_files)
    }

    /// License name, or `"None"` when the repository has none.
    pub async fn get_license(&self) -> FetchOutcome<String> {
        tracing::info!("Checking license...");
        let variables = Value::Object(self.repo_variables());
        let response = match self.executor.execute(LICENSE_QUERY, &variables).await {
            Ok(response) => response,
            Err(reason) => {
                tracing::error!(error = %reason, "Error retrieving license information");
                return FetchOutcome::Truncated {
                    data: NO_LICENSE.to_string(),
                    reason,
                };
            }
        };

        let license = response
            .pointer("/data/repository/licenseInfo")
            .cloned()
            .and_then(|info| serde_json::from_value::<LicenseInfo>(info).ok())
            .and_then(|info| info.name)
            .unwrap_or_else(|| NO_LICENSE.to_string());

        tracing::info!(%license, "License found");
        FetchOutcome::Complete(license)
    }

    pub async fn get_releases(&self) -> FetchOutcome<Vec<Release>> {
        tracing::info!("Checking releases...");
        let extractor = ReleasesExtractor::new(self.settings.cutoff.as_str());
        let outcome = self
            .engine()
            .paginate("releases", RELEASES_QUERY, &extractor, &self.page_variables())
            .await;
        tracing::info!(count = outcome.data().len(), "Found releases in the window");
        outcome
    }

    /// Each author login with its most recent commit date in the window.
    pub async fn get_contributors(&self) -> FetchOutcome<ContributorMap> {
        tracing::info!("Checking contributors...");
        let outcome = self
            .engine()
            .paginate(
                "contributors",
                COMMIT_HISTORY_QUERY,
                &ContributorsExtractor,
                &self.history_variables(),
            )
            .await
            .map(|pages| pages.into_iter().collect::<ContributorMap>());
        tracing::info!(count = outcome.data().len(), "Found contributors in the window");
        outcome
    }

    pub async fn get_commits(&self) -> FetchOutcome<Vec<CommitRecord>> {
        tracing::info!("Checking commits...");
        let outcome = self
            .engine()
            .paginate(
                "commits",
                COMMIT_HISTORY_QUERY,
                &CommitsExtractor,
                &self.history_variables(),
            )
            .await;
        tracing::info!(count = outcome.data().len(), "Found commits in the window");
        outcome
    }

    pub async fn get_issues(&self) -> FetchOutcome<Vec<IssueRecord>> {
        tracing::info!("Checking issues...");
        let extractor = IssuesExtractor::new(self.settings.cutoff.as_str());
        let outcome = self
            .engine()
            .paginate("issues", ISSUES_QUERY, &extractor, &self.page_variables())
            .await;
        tracing::info!(count = outcome.data().len(), "Found issues in the window");
        outcome
    }

    /// Run all six fetchers one after another.
    pub async fn fetch_all(&self) -> RepositoryMetrics {
        RepositoryMetrics {
            root_md_files: self.get_root_md_files().await,
            license: self.get_license().await,
            releases: self.get_releases().await,
            contributors: self.get_contributors().await,
            commits: self.get_commits().await,
            issues: self.get_issues().await,
        }
    }
}

/// The six resources of one run.
#[derive(Debug, Clone)]
pub struct RepositoryMetrics {
    pub root_md_files: FetchOutcome<Vec<String>>,
    pub license: FetchOutcome<String>,
    pub releases: FetchOutcome<Vec<Release>>,
    pub contributors: FetchOutcome<ContributorMap>,
    pub commits: FetchOutcome<Vec<CommitRecord>>,
    pub issues: FetchOutcome<Vec<IssueRecord>>,
}

/// Row of the end-of-run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSummary {
    pub resource: &'static str,
    pub count: usize,
    pub failure: Option<String>,
}

impl RepositoryMetrics {
    pub fn summary(&self) -> Vec<ResourceSummary> {
        fn row<P>(resource: &'static str, count: usize, outcome: &FetchOutcome<P>) -> ResourceSummary {
            ResourceSummary {
                resource,
                count,
                failure: outcome.reason().map(|r| r.to_string()),
            }
        }

        vec![
            row("root_md_files", self.root_md_files.data().len(), &self.root_md_files),
            row("license", 1, &self.license),
            row("releases", self.releases.data().len(), &self.releases),
            row("contributors", self.contributors.data().len(), &self.contributors),
            row("commits", self.commits.data().len(), &self.commits),
            row("issues", self.issues.data().len(), &self.issues),
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.summary().iter().all(|row| row.failure.is_none())
    }
}
