use serde_json::{Map, Value};

use super::extractor::{ExtractionResult, PageExtractor};
use super::outcome::FetchOutcome;
use crate::client::QueryExecutor;
use crate::models::PageInfo;

/// Merge the fixed variables with the cursor. The `cursor` key is left out
/// entirely on the first page rather than sent as null.
pub fn build_variables(initial: &Map<String, Value>, cursor: Option<&str>) -> Value {
    let mut variables = initial.clone();
    variables.remove("cursor");
    if let Some(cursor) = cursor {
        variables.insert("cursor".to_string(), Value::String(cursor.to_string()));
    }
    Value::Object(variables)
}

/// Drives a paginated query until the extractor or the server says stop.
pub struct PaginationEngine<'a, E: QueryExecutor + ?Sized> {
    executor: &'a E,
}

impl<'a, E: QueryExecutor + ?Sized> PaginationEngine<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Fetch every page of `document`, concatenating extracted items in page order.
    ///
    /// A failed request ends the loop and returns what was gathered so far as
    /// `Truncated`. There is no page cap.
    pub async fn paginate<X>(
        &self,
        resource: &str,
        document: &str,
        extractor: &X,
        initial_variables: &Map<String, Value>,
    ) -> FetchOutcome<Vec<X::Item>>
    where
        X: PageExtractor,
    {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            tracing::info!(resource, page = page_count, "Fetching page");

            let variables = build_variables(initial_variables, cursor.as_deref());
            let response = match self.executor.execute(document, &variables).await {
                Ok(response) => response,
                Err(reason) => {
                    tracing::error!(resource, page = page_count, error = %reason, "Query failed");
                    tracing::warn!(
                        resource,
                        items = items.len(),
                        "Stopping pagination, keeping the items fetched so far"
                    );
                    return FetchOutcome::Truncated {
                        data: items,
                        reason,
                    };
                }
            };

            let ExtractionResult {
                items: batch,
                next_page,
            } = extractor.extract(&response);
            tracing::debug!(resource, count = batch.len(), "Retrieved items in this batch");
            items.extend(batch);

            match next_page {
                Some(PageInfo {
                    has_next: true,
                    end_cursor: Some(next),
                }) => {
                    tracing::debug!(resource, cursor = %next, "Next cursor");
                    cursor = Some(next);
                }
                Some(PageInfo {
                    has_next: true,
                    end_cursor: None,
                }) => {
                    tracing::warn!(resource, "Server reported another page without a cursor, stopping");
                    break;
                }
                _ => break,
            }
        }

        tracing::info!(
            resource,
            pages = page_count,
            items = items.len(),
            "Pagination complete"
        );
        FetchOutcome::Complete(items)
    }
}
