//! Query loading for geoquery.
//!
//! A query is schema-free JSON. It is parsed once, its geometry literals are
//! decoded, and from then on it is read-only input to the engine.

mod source;

pub use source::QuerySource;

use crate::error::{GeoQueryError, Result};
use crate::geometry::{self, Geometry};
use crate::value::GeoValue;

/// An immutable, decoded query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query(GeoValue);

impl Query {
    /// The empty query object `{}`.
    pub fn empty() -> Self {
        Self(GeoValue::empty_object())
    }

    /// Parses JSON query text, decoding embedded geometries.
    ///
    /// Invalid JSON and malformed geometry literals are both reported as
    /// query parse errors.
    pub fn parse(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| GeoQueryError::query_parse(format!("invalid JSON: {e}")))?;

        geometry::decode(json).map(Self).map_err(|e| match e {
            GeoQueryError::MalformedGeometry(msg) => {
                GeoQueryError::query_parse(format!("malformed geometry: {msg}"))
            }
            other => other,
        })
    }

    /// The decoded value tree.
    pub fn as_value(&self) -> &GeoValue {
        &self.0
    }

    /// Geometry literals embedded in the query.
    pub fn geometries(&self) -> Vec<&Geometry> {
        self.0.geometries()
    }

    /// Returns true for the empty query object.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty_object()
    }
}

impl From<GeoValue> for Query {
    fn from(value: GeoValue) -> Self {
        Self(value)
    }
}
