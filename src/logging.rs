//! Logging configuration for geoquery.
//!
//! Logging is off unless `--log` names a configuration file. The file is a
//! small TOML document; [`init`] installs the global subscriber exactly once
//! at process start.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{GeoQueryError, Result};

/// Logging configuration loaded from `--log <path>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "geoquery=debug,reqwest=warn".
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file; stderr when absent. Relative paths resolve against the
    /// directory holding the configuration file.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Emit ANSI colours.
    #[serde(default)]
    pub ansi: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
            ansi: false,
        }
    }
}

impl LoggingConfig {
    /// Loads a logging configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeoQueryError::config(format!(
                "Failed to read logging config {}: {e}",
                path.display()
            ))
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            GeoQueryError::config(format!(
                "Logging configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })?;

        if let (Some(file), Some(parent)) = (&config.file, path.parent()) {
            if file.is_relative() {
                config.file = Some(parent.join(file));
            }
        }

        Ok(config)
    }

    /// Builds the event filter for this configuration.
    pub fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            GeoQueryError::config(format!("Invalid log level '{}': {e}", self.level))
        })
    }
}

/// Installs the global tracing subscriber.
///
/// Log files are appended to so repeated runs keep their history.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = config.filter()?;

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    GeoQueryError::config(format!(
                        "Could not open log file {}: {e}",
                        path.display()
                    ))
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(config.ansi)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .try_init(),
    };

    installed.map_err(|e| GeoQueryError::config(format!("Could not initialize logging: {e}")))
}

/// Loads the configuration at `path` and installs the subscriber.
pub fn init_from_file(path: &Path) -> Result<()> {
    init(&LoggingConfig::load(path)?)
}
