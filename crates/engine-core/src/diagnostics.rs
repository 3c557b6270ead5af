use chrono::{DateTime, Utc};
use connectors::error::ExecutionError;
use futures::lock::Mutex;
use model::core::value::Value;
use planner::query::renderer::RenderedQuery;
use serde::Serialize;
use std::sync::Arc;

/// A query whose failure was turned into an empty result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedQuery {
    pub sql: String,
    pub params: Vec<Value>,
    pub error: String,
    /// Groups repeated failures of the same text and parameters.
    pub fingerprint: String,
    pub failed_at: DateTime<Utc>,
}

impl FailedQuery {
    pub fn new(query: &RenderedQuery, error: &ExecutionError) -> Self {
        FailedQuery {
            sql: query.sql.clone(),
            params: query.params.clone(),
            error: error.to_string(),
            fingerprint: query.fingerprint(),
            failed_at: Utc::now(),
        }
    }
}

/// Append-only log of degraded failures, shared by clones of a session.
///
/// Nothing is evicted: a long-lived session keeps every failure until the
/// caller takes them with [`Diagnostics::drain`].
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    failures: Arc<Mutex<Vec<FailedQuery>>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, failure: FailedQuery) {
        self.failures.lock().await.push(failure);
    }

    pub async fn failures(&self) -> Vec<FailedQuery> {
        self.failures.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.failures.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.failures.lock().await.is_empty()
    }

    /// Removes and returns everything recorded so far.
    pub async fn drain(&self) -> Vec<FailedQuery> {
        std::mem::take(&mut *self.failures.lock().await)
    }
}
