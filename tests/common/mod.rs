use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use repo_metrics::{QueryExecutor, QueryFailure};
use serde_json::Value;

/// Answers each query from a per-document queue, keyed by a fragment of the
/// query text (e.g. `"licenseInfo"`).
#[derive(Default)]
pub struct RoutedExecutor {
    routes: Mutex<Vec<(&'static str, VecDeque<Result<Value, QueryFailure>>)>>,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl RoutedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, fragment: &'static str, responses: Vec<Result<Value, QueryFailure>>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((fragment, responses.into()));
        self
    }

    pub fn calls(&self, fragment: &str) -> usize {
        self.calls.lock().unwrap().get(fragment).copied().unwrap_or(0)
    }
}

#[async_trait]
impl QueryExecutor for RoutedExecutor {
    async fn execute(&self, document: &str, _variables: &Value) -> Result<Value, QueryFailure> {
        let mut routes = self.routes.lock().unwrap();
        for (fragment, queue) in routes.iter_mut() {
            if document.contains(*fragment) {
                *self.calls.lock().unwrap().entry(*fragment).or_insert(0) += 1;
                return queue.pop_front().unwrap_or_else(|| {
                    Err(QueryFailure::Transport {
                        cause: format!("no response left for {}", fragment),
                    })
                });
            }
        }
        Err(QueryFailure::Status { status: 404 })
    }
}
