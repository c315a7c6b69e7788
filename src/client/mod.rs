pub mod executor;
pub mod github_client;

pub use executor::QueryExecutor;
pub use github_client::GitHubClient;
