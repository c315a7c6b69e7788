use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::error::QueryFailure;

/// One request/response round trip against a GraphQL endpoint.
///
/// Implementations return the decoded body on success and never retry.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, document: &str, variables: &Value) -> Result<Value, QueryFailure>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn execute(&self, document: &str, variables: &Value) -> Result<Value, QueryFailure> {
        (**self).execute(document, variables).await
    }
}
