//! Mock query engine for testing.
//!
//! Returns a canned result, optionally after a delay, and remembers the
//! queries it was asked to run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{with_deadline, ExecutionResult, QueryExecutor};
use crate::config::ExecutionConfig;
use crate::error::{GeoQueryError, Result};
use crate::query::Query;

/// A mock engine that returns a predefined result.
pub struct MockExecutor {
    response: std::result::Result<ExecutionResult, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_query: Mutex<Option<Query>>,
}

impl MockExecutor {
    /// Creates a mock that answers every query with `result`.
    pub fn new(result: ExecutionResult) -> Self {
        Self {
            response: Ok(result),
            delay: None,
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    /// Creates a mock whose every execution fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            ..Self::new(ExecutionResult::default())
        }
    }

    /// Makes every execution take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times `execute` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent query passed to `execute`.
    pub fn last_query(&self) -> Option<Query> {
        self.last_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn execute(&self, config: &ExecutionConfig, query: &Query) -> Result<ExecutionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(query.clone());

        with_deadline(config, async {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.response.clone().map_err(GeoQueryError::execution)
        })
        .await
    }
}
