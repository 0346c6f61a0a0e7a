//! Query source resolution.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Query;
use crate::error::Result;

/// Where the query text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// A file holding JSON query text.
    File(PathBuf),
    /// Literal JSON query text.
    Text(String),
    /// No query given; the empty object is used.
    Empty,
}

impl QuerySource {
    /// Resolves the source from the `--input` and `--query` arguments.
    ///
    /// An input file wins when it exists. A missing input file falls back to
    /// the literal text and then to the empty query.
    pub fn resolve(input: Option<&Path>, text: Option<&str>) -> Self {
        if let Some(path) = input {
            if path.exists() {
                return Self::File(path.to_path_buf());
            }
            warn!("Query file {} does not exist, ignoring it", path.display());
        }

        match text {
            Some(text) => Self::Text(text.to_string()),
            None => Self::Empty,
        }
    }

    /// Reads and parses the query.
    pub fn load(&self) -> Result<Query> {
        match self {
            Self::File(path) => {
                debug!("Loading query from {}", path.display());
                let text = std::fs::read_to_string(path)?;
                Query::parse(&text)
            }
            Self::Text(text) => Query::parse(text),
            Self::Empty => {
                debug!("No query given, using the empty query object");
                Ok(Query::empty())
            }
        }
    }
}
