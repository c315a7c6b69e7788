use std::path::PathBuf;
use std::sync::Arc;

use crate::client::GitHubClient;
use crate::config::{load_config, Config, ConfigOverrides};
use crate::error::MetricsResult;
use crate::fetcher::{FetchSettings, MetricsFetcher};

/// Central context for CLI operations, holding the resolved configuration
/// and the client built from it.
pub struct CliContext {
    config: Config,
    client: Option<Arc<GitHubClient>>,
}

impl CliContext {
    /// Load configuration from file and environment, then apply CLI overrides.
    pub fn load(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> MetricsResult<Self> {
        let mut config = load_config(config_path.as_deref())?;
        config.apply_overrides(overrides);
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            client: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get or create a client. Fails if the configuration is incomplete.
    pub fn verified_client(&mut self) -> MetricsResult<Arc<GitHubClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        self.config.validate()?;
        let client = Arc::new(GitHubClient::new(&self.config)?);
        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn fetcher(&mut self) -> MetricsResult<MetricsFetcher<Arc<GitHubClient>>> {
        let client = self.verified_client()?;
        let settings = FetchSettings::from_config(&self.config)?;
        Ok(MetricsFetcher::new(client, settings))
    }
}
