//! Configuration management for geoquery.
//!
//! Two kinds of configuration live here: the per-invocation
//! [`ExecutionConfig`] handed to the query engine, and the optional
//! [`Settings`] file that says where the engine can be reached.

use crate::error::{GeoQueryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

/// Default execution timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Engine setting key for the catalog connection.
pub const ENGINE_KEY_CATALOG: &str = "sqlalchemy.catalog";

/// Engine setting key for the vector store connection.
pub const ENGINE_KEY_VECTOR_STORE: &str = "sqlalchemy.vectorstore";

/// Engine setting key for the timeout, in milliseconds.
pub const ENGINE_KEY_TIMEOUT: &str = "timeout";

/// Environment variable overriding the engine URL.
pub const ENGINE_URL_ENV: &str = "GEOQUERY_ENGINE_URL";

/// Immutable execution parameters for one query run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    catalog_connection: String,
    vector_store_connection: String,
    timeout_millis: u64,
}

impl ExecutionConfig {
    /// Assembles an execution config from user input.
    ///
    /// Connection strings must be non-empty and the timeout, given in
    /// seconds, must not be negative.
    pub fn new(
        catalog_connection: impl Into<String>,
        vector_store_connection: impl Into<String>,
        timeout_secs: i64,
    ) -> Result<Self> {
        let catalog_connection = catalog_connection.into();
        let vector_store_connection = vector_store_connection.into();

        if catalog_connection.trim().is_empty() {
            return Err(GeoQueryError::config(
                "catalog connection string must not be empty",
            ));
        }
        if vector_store_connection.trim().is_empty() {
            return Err(GeoQueryError::config(
                "vector store connection string must not be empty",
            ));
        }

        let timeout_secs = u64::try_from(timeout_secs).map_err(|_| {
            GeoQueryError::config(format!("timeout must not be negative, got {timeout_secs}"))
        })?;
        let timeout_millis = timeout_secs.checked_mul(1000).ok_or_else(|| {
            GeoQueryError::config(format!("timeout of {timeout_secs} seconds is too large"))
        })?;

        Ok(Self {
            catalog_connection,
            vector_store_connection,
            timeout_millis,
        })
    }

    pub fn catalog_connection(&self) -> &str {
        &self.catalog_connection
    }

    pub fn vector_store_connection(&self) -> &str {
        &self.vector_store_connection
    }

    pub fn timeout_millis(&self) -> u64 {
        self.timeout_millis
    }

    /// Execution deadline, or `None` when the timeout is zero (unbounded).
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_millis > 0).then(|| Duration::from_millis(self.timeout_millis))
    }

    /// Renders the settings mapping the query engine expects.
    pub fn to_engine_settings(&self) -> serde_json::Value {
        json!({
            ENGINE_KEY_CATALOG: self.catalog_connection,
            ENGINE_KEY_VECTOR_STORE: self.vector_store_connection,
            ENGINE_KEY_TIMEOUT: self.timeout_millis,
        })
    }

    /// Returns a display-safe summary (no passwords) for logging.
    pub fn display_string(&self) -> String {
        format!(
            "catalog={} vectorstore={} timeout={}ms",
            redact_connection(&self.catalog_connection),
            redact_connection(&self.vector_store_connection),
            self.timeout_millis
        )
    }
}

/// Removes the password from a URL-style connection string.
///
/// Strings that do not parse as URLs are returned unchanged.
pub fn redact_connection(connection: &str) -> String {
    match Url::parse(connection) {
        Ok(mut url) if url.password().is_some() => {
            // set_password only fails for cannot-be-a-base URLs, which have no password
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        _ => connection.to_string(),
    }
}

/// Settings file for geoquery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Query engine endpoint.
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Where the query engine is reached.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineSettings {
    /// Engine URL (e.g., "http://localhost:5000/api/query").
    pub url: Option<String>,
}

impl EngineSettings {
    /// Applies the `GEOQUERY_ENGINE_URL` environment variable, which wins over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENGINE_URL_ENV) {
            if !url.trim().is_empty() {
                self.url = Some(url);
            }
        }
    }

    /// Returns the validated engine endpoint.
    pub fn endpoint(&self) -> Result<Url> {
        let raw = self.url.as_deref().ok_or_else(|| {
            GeoQueryError::config(format!(
                "No query engine configured. Set [engine] url in the config file or {ENGINE_URL_ENV}"
            ))
        })?;

        let url = Url::parse(raw)
            .map_err(|e| GeoQueryError::config(format!("Invalid engine URL '{raw}': {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(GeoQueryError::config(format!(
                "Invalid engine URL scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        Ok(url)
    }
}

impl Settings {
    /// Returns the default settings file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geoquery")
            .join("config.toml")
    }

    /// Loads settings from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GeoQueryError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses settings from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            GeoQueryError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
