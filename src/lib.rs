// Module declarations
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod writer;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use client::{GitHubClient, QueryExecutor};
pub use config::{load_config, Config, ConfigOverrides};
pub use error::{MetricsError, MetricsResult, QueryFailure};
pub use fetcher::{FetchSettings, MetricsFetcher, RepositoryMetrics};
pub use models::*;
pub use pagination::{FetchOutcome, PaginationEngine};
pub use writer::JsonlWriter;
