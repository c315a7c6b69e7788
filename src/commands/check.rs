use std::path::Path;

use crate::cli_context::CliContext;
use crate::error::{ErrorContext, MetricsResult};
use crate::fetcher::RepositoryMetrics;
use crate::formatting::print_metrics;
use crate::models::{
    CommitRecord, ContributorMap, ContributorRecord, IssueRecord, LicenseRecord, Release, RootFile,
};
use crate::pagination::FetchOutcome;
use crate::writer::read_jsonl;

/// Print every metric to the terminal instead of writing files.
pub async fn handle_check(context: &mut CliContext, from_dir: Option<&Path>) -> MetricsResult<()> {
    let metrics = match from_dir {
        Some(dir) => load_metrics(context, dir)?,
        None => {
            let fetcher = context.fetcher()?;
            let settings = fetcher.settings();
            println!(
                "Checking metrics for repository: {}/{}",
                settings.owner, settings.repo_name
            );
            fetcher.fetch_all().await
        }
    };

    print_metrics(&metrics);
    Ok(())
}

/// Rebuild a run from the JSONL files a previous `collect` wrote.
fn load_metrics(context: &CliContext, dir: &Path) -> MetricsResult<RepositoryMetrics> {
    let files = &context.config().outputs;
    let path_for = |name: &str| dir.join(name);

    let root_md_files: Vec<RootFile> = read_jsonl(&path_for(&files.root_md_files))
        .with_context(|| format!("Reading {}", files.root_md_files))?;
    let license: Vec<LicenseRecord> = read_jsonl(&path_for(&files.license))
        .with_context(|| format!("Reading {}", files.license))?;
    let releases: Vec<Release> = read_jsonl(&path_for(&files.releases))
        .with_context(|| format!("Reading {}", files.releases))?;
    let contributors: Vec<ContributorRecord> = read_jsonl(&path_for(&files.contributors))
        .with_context(|| format!("Reading {}", files.contributors))?;
    let commits: Vec<CommitRecord> = read_jsonl(&path_for(&files.commits))
        .with_context(|| format!("Reading {}", files.commits))?;
    let issues: Vec<IssueRecord> = read_jsonl(&path_for(&files.issues))
        .with_context(|| format!("Reading {}", files.issues))?;

    let mut contributor_map = ContributorMap::new();
    for record in contributors {
        contributor_map.record(&record.login, &record.last_contribution);
    }

    Ok(RepositoryMetrics {
        root_md_files: FetchOutcome::Complete(root_md_files.into_iter().map(|f| f.file).collect()),
        license: FetchOutcome::Complete(
            license
                .into_iter()
                .next()
                .map(|l| l.license)
                .unwrap_or_else(|| crate::constants::NO_LICENSE.to_string()),
        ),
        releases: FetchOutcome::Complete(releases),
        contributors: FetchOutcome::Complete(contributor_map),
        commits: FetchOutcome::Complete(commits),
        issues: FetchOutcome::Complete(issues),
    })
}
