//! Error types for geoquery.
//!
//! Defines the main error enum used throughout the application.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for geoquery operations.
#[derive(Error, Debug)]
pub enum GeoQueryError {
    /// Query text is not valid JSON or embeds a malformed geometry.
    #[error("Query parse error: {0}")]
    QueryParse(String),

    /// A recognised geometry discriminator with an invalid payload.
    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    /// A feature or feature collection that does not follow GeoJSON.
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// Bad timeout, connection string or engine settings.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Output file already exists and overwriting was not requested.
    #[error("Output file {} already exists. Use --force to overwrite it.", .0.display())]
    OutputExists(PathBuf),

    /// Backend failure reported by the query engine.
    #[error("Execution error: {0}")]
    Execution(String),

    /// The engine did not answer within the configured timeout.
    #[error("Execution exceeded timeout of {0} ms")]
    ExecutionTimeout(u64),

    /// The engine returned no feature collection.
    #[error("Execution returned no results")]
    EmptyResult,

    /// File-system failures while reading the query or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeoQueryError {
    /// Creates a query parse error with the given message.
    pub fn query_parse(msg: impl Into<String>) -> Self {
        Self::QueryParse(msg.into())
    }

    /// Creates a malformed geometry error with the given message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedGeometry(msg.into())
    }

    /// Creates an invalid GeoJSON error with the given message.
    pub fn geojson(msg: impl Into<String>) -> Self {
        Self::InvalidGeoJson(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates an execution error with the given message.
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::QueryParse(_) => "Query Parse Error",
            Self::MalformedGeometry(_) => "Malformed Geometry Error",
            Self::InvalidGeoJson(_) => "GeoJSON Error",
            Self::InvalidConfig(_) => "Configuration Error",
            Self::OutputExists(_) => "Output Exists Error",
            Self::Execution(_) => "Execution Error",
            Self::ExecutionTimeout(_) => "Execution Timeout Error",
            Self::EmptyResult => "Empty Result Error",
            Self::Io(_) => "I/O Error",
        }
    }
}

/// Result type alias using GeoQueryError.
pub type Result<T> = std::result::Result<T, GeoQueryError>;
