use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;

use super::executor::QueryExecutor;
use crate::config::Config;
use crate::error::{MetricsError, MetricsResult, QueryFailure};
use crate::models::{graphql_error_messages, GraphQLRequest};

/// GraphQL client for the GitHub API using bearer-token auth.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> MetricsResult<Self> {
        let token = config
            .github_token
            .as_deref()
            .ok_or(MetricsError::MissingConfig("GITHUB_TOKEN"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-metrics/", env!("CARGO_PKG_VERSION"))),
        );
        let mut auth = HeaderValue::from_str(&format!("bearer {}", token))
            .map_err(|_| MetricsError::ConfigError("Invalid GitHub token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl QueryExecutor for GitHubClient {
    async fn execute(&self, document: &str, variables: &Value) -> Result<Value, QueryFailure> {
        tracing::debug!(%variables, "Running query");

        let body = GraphQLRequest {
            query: document,
            variables,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| QueryFailure::Transport {
                cause: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(QueryFailure::Status {
                status: status.as_u16(),
            });
        }

        let decoded: Value = response.json().await.map_err(|e| QueryFailure::Decode {
            cause: e.to_string(),
        })?;

        let errors = graphql_error_messages(&decoded);
        if !errors.is_empty() {
            tracing::warn!(errors = %errors.join(", "), "GraphQL response carried errors");
        }

        tracing::debug!("Query successful");
        Ok(decoded)
    }
}
