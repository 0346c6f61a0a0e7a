//! HTTP client for a remote query engine.
//!
//! Posts the execution settings and the encoded query to the engine and
//! decodes the result envelope it answers with.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use super::{with_deadline, ExecutionResult, QueryExecutor};
use crate::config::ExecutionConfig;
use crate::error::{GeoQueryError, Result};
use crate::geometry;
use crate::query::Query;

/// Error body returned by the engine.
#[derive(Debug, Deserialize)]
struct EngineErrorResponse {
    message: String,
}

/// Query engine reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    endpoint: Url,
    client: Client,
}

impl HttpExecutor {
    /// Creates an executor for the engine at `endpoint`.
    pub fn new(endpoint: Url) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| GeoQueryError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(endpoint, client))
    }

    /// Creates an executor that sends requests through `client`.
    pub fn with_client(endpoint: Url, client: Client) -> Self {
        Self { endpoint, client }
    }

    /// Returns the engine endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the request body sent to the engine.
    fn request_body(config: &ExecutionConfig, query: &Query) -> Value {
        json!({
            "config": config.to_engine_settings(),
            "query": geometry::encode(query.as_value()),
        })
    }

    /// Maps a non-success response to an error.
    fn parse_error(status: StatusCode, body: &str, config: &ExecutionConfig) -> GeoQueryError {
        if status == StatusCode::GATEWAY_TIMEOUT || status == StatusCode::REQUEST_TIMEOUT {
            return GeoQueryError::ExecutionTimeout(config.timeout_millis());
        }

        let message = serde_json::from_str::<EngineErrorResponse>(body)
            .map(|response| response.message)
            .unwrap_or_else(|_| format!("engine responded with {status}: {body}"));

        // The engine reports cancelled statements with a plain message.
        if message.to_lowercase().contains("exceeded timeout") {
            return GeoQueryError::ExecutionTimeout(config.timeout_millis());
        }

        GeoQueryError::execution(message)
    }

    fn map_request_error(error: reqwest::Error, config: &ExecutionConfig) -> GeoQueryError {
        if error.is_timeout() {
            GeoQueryError::ExecutionTimeout(config.timeout_millis())
        } else if error.is_connect() {
            GeoQueryError::execution(format!("Cannot reach query engine: {error}"))
        } else {
            GeoQueryError::execution(format!("Query engine request failed: {error}"))
        }
    }

    async fn send(&self, config: &ExecutionConfig, query: &Query) -> Result<ExecutionResult> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&Self::request_body(config, query))
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, config))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_request_error(e, config))?;
        debug!("Engine answered {} with {} bytes", status, body.len());

        if !status.is_success() {
            let error = Self::parse_error(status, &body, config);
            warn!("Engine request failed: {}", error);
            return Err(error);
        }

        let envelope: Value = serde_json::from_str(&body).map_err(|e| {
            GeoQueryError::execution(format!("Engine returned invalid JSON: {e}"))
        })?;
        ExecutionResult::from_json(envelope)
    }
}

#[async_trait]
impl QueryExecutor for HttpExecutor {
    async fn execute(&self, config: &ExecutionConfig, query: &Query) -> Result<ExecutionResult> {
        debug!("Posting query to {}", self.endpoint);
        with_deadline(config, self.send(config, query)).await
    }
}
