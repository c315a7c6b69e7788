use std::time::Instant;

use crate::cli_context::CliContext;
use crate::client::QueryExecutor;
use crate::error::{ErrorContext, MetricsResult};
use crate::fetcher::{MetricsFetcher, RepositoryMetrics};
use crate::formatting::print_summary;
use crate::writer::JsonlWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectStatus {
    Complete,
    /// At least one resource was cut short by a failed request.
    Truncated,
}

/// Fetch all six resources and write each to its JSONL file.
pub async fn handle_collect(context: &mut CliContext) -> MetricsResult<CollectStatus> {
    let start = Instant::now();
    let fetcher = context.fetcher()?;
    let writer = JsonlWriter::new(context.config());

    let settings = fetcher.settings();
    tracing::info!(
        owner = %settings.owner,
        repo = %settings.repo_name,
        cutoff = %settings.cutoff,
        "Processing repository"
    );

    let metrics = collect_into(&fetcher, &writer).await?;
    print_summary(&metrics.summary(), writer.output_dir());

    tracing::info!(
        seconds = start.elapsed().as_secs_f64(),
        "Metrics collection completed"
    );

    if metrics.is_complete() {
        Ok(CollectStatus::Complete)
    } else {
        Ok(CollectStatus::Truncated)
    }
}

/// Fetch and write resource by resource, so each file lands before the next fetch starts.
pub async fn collect_into<E: QueryExecutor>(
    fetcher: &MetricsFetcher<E>,
    writer: &JsonlWriter,
) -> MetricsResult<RepositoryMetrics> {
    let root_md_files = fetcher.get_root_md_files().await;
    writer
        .write_root_md_files(root_md_files.data())
        .context("Failed to write root .md files")?;

    let license = fetcher.get_license().await;
    writer
        .write_license(license.data())
        .context("Failed to write license")?;

    let releases = fetcher.get_releases().await;
    writer
        .write_releases(releases.data())
        .context("Failed to write releases")?;

    let contributors = fetcher.get_contributors().await;
    writer
        .write_contributors(contributors.data())
        .context("Failed to write contributors")?;

    let commits = fetcher.get_commits().await;
    writer
        .write_commits(commits.data())
        .context("Failed to write commits")?;

    let issues = fetcher.get_issues().await;
    writer
        .write_issues(issues.data())
        .context("Failed to write issues")?;

    let metrics = RepositoryMetrics {
        root_md_files,
        license,
        releases,
        contributors,
        commits,
        issues,
    };

    for row in metrics.summary() {
        if let Some(failure) = &row.failure {
            tracing::warn!(
                resource = row.resource,
                items = row.count,
                %failure,
                "Resource is incomplete, output holds partial data"
            );
        }
    }

    Ok(metrics)
}
