use colored::*;

use crate::cli_context::CliContext;
use crate::error::MetricsResult;

pub fn handle_show_config(context: &CliContext) -> MetricsResult<()> {
    let config = context.config();
    let unset = || "(not set)".to_string();

    println!("{}", "Effective configuration".bold());
    println!("{}", "─".repeat(60).dimmed());
    println!("{:<22} {}", "Owner:".bold(), config.owner.clone().unwrap_or_else(unset));
    println!("{:<22} {}", "Repository:".bold(), config.repo_name.clone().unwrap_or_else(unset));
    println!("{:<22} {}", "Token:".bold(), config.masked_token());
    println!("{:<22} {}", "API URL:".bold(), config.api_url);
    let since = config.cutoff().unwrap_or_else(|_| "out of range".to_string());
    println!("{:<22} {} days (since {})", "Window:".bold(), config.date_range_days, since);
    println!("{:<22} {}", "Page size:".bold(), config.page_size());
    println!("{:<22} {}s", "Request timeout:".bold(), config.request_timeout_secs);
    println!("{:<22} {}", "Output directory:".bold(), config.output_dir.display());

    if let Err(e) = config.validate() {
        println!("\n{} {}", "⚠".yellow(), e.to_string().yellow());
    }
    Ok(())
}
