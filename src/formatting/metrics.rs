use std::path::Path;

use colored::*;

use super::utils::{format_relative_time, truncate};
use crate::fetcher::{RepositoryMetrics, ResourceSummary};
use crate::models::IssueState;
use crate::pagination::FetchOutcome;

fn section_header<P>(index: usize, title: &str, outcome: &FetchOutcome<P>) {
    println!("\n{}", format!("{}. {}", index, title).bold());
    if let Some(reason) = outcome.reason() {
        println!("   {} {}", "incomplete:".yellow(), reason.to_string().yellow());
    }
}

fn print_empty(label: &str) {
    println!("   {}", format!("No {} found.", label).dimmed());
}

pub fn print_metrics(metrics: &RepositoryMetrics) {
    println!("{}", "=".repeat(50).dimmed());

    section_header(1, ".md files in the root folder", &metrics.root_md_files);
    if metrics.root_md_files.data().is_empty() {
        print_empty(".md files");
    }
    for file in metrics.root_md_files.data() {
        println!("   - {}", file.cyan());
    }

    section_header(2, "License", &metrics.license);
    println!("   {}", metrics.license.data());

    section_header(3, "Releases", &metrics.releases);
    if metrics.releases.data().is_empty() {
        print_empty("releases");
    }
    for release in metrics.releases.data() {
        println!(
            "   - {}: {} {}",
            release.name.bold(),
            release.published_at,
            format!("({})", format_relative_time(&release.published_at)).dimmed()
        );
    }

    section_header(4, "Contributors and their most recent contribution", &metrics.contributors);
    if metrics.contributors.data().is_empty() {
        print_empty("contributors");
    }
    for (login, date) in metrics.contributors.data().iter() {
        println!(
            "   - {}: {} {}",
            login.cyan(),
            date,
            format!("({})", format_relative_time(date)).dimmed()
        );
    }

    section_header(5, "Commits", &metrics.commits);
    if metrics.commits.data().is_empty() {
        print_empty("commits");
    }
    for commit in metrics.commits.data() {
        println!(
            "   - {}: {} - {}",
            commit.date.dimmed(),
            commit.author.cyan(),
            truncate(&commit.message, 72)
        );
    }

    section_header(6, "Issues", &metrics.issues);
    if metrics.issues.data().is_empty() {
        print_empty("issues");
    }
    for issue in metrics.issues.data() {
        let state = match issue.state {
            IssueState::Open => issue.state.to_string().green(),
            IssueState::Closed => issue.state.to_string().red(),
        };
        println!(
            "   - {}: {} - {}",
            state,
            issue.author.cyan(),
            truncate(&issue.title, 72)
        );
    }
}

pub fn print_summary(rows: &[ResourceSummary], output_dir: &Path) {
    println!("\n{}", "─".repeat(60).dimmed());
    println!("{:<16} {:>8}  {}", "Resource".bold(), "Items".bold(), "Status".bold());
    println!("{}", "─".repeat(60).dimmed());

    for row in rows {
        let status = match &row.failure {
            None => "complete".green(),
            Some(reason) => format!("truncated ({})", reason).yellow(),
        };
        println!("{:<16} {:>8}  {}", row.resource, row.count, status);
    }

    println!("{}", "─".repeat(60).dimmed());
    println!("Output written to {}", output_dir.display().to_string().cyan());
}
