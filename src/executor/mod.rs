//! Query engine abstraction.
//!
//! The engine that actually plans and runs spatial queries is an external
//! collaborator. This module defines the contract geoquery expects from it
//! and ships two implementations: an HTTP client for a remote engine and an
//! in-memory mock.

mod http;
mod mock;
mod result;

pub use http::HttpExecutor;
pub use mock::MockExecutor;
pub use result::ExecutionResult;

use std::future::Future;

use async_trait::async_trait;

use crate::config::ExecutionConfig;
use crate::error::{GeoQueryError, Result};
use crate::query::Query;

/// Trait defining the interface to a query engine.
///
/// Implementations may block for up to `config.timeout()` and must report an
/// exceeded deadline as [`GeoQueryError::ExecutionTimeout`]; every other
/// backend failure is [`GeoQueryError::Execution`].
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Executes a query and returns the engine's result envelope.
    async fn execute(&self, config: &ExecutionConfig, query: &Query) -> Result<ExecutionResult>;
}

/// Runs `future` under the configured execution deadline.
pub async fn with_deadline<F, T>(config: &ExecutionConfig, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match config.timeout() {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| GeoQueryError::ExecutionTimeout(config.timeout_millis()))?,
        None => future.await,
    }
}
