//! Result envelope returned by the query engine.

use serde_json::Value;

use crate::error::{GeoQueryError, Result};
use crate::feature::FeatureCollection;

/// The engine's answer to one query.
///
/// The engine runs every query of the request's queue and returns one
/// feature collection per query in `data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    /// One feature collection per executed query.
    pub data: Vec<FeatureCollection>,

    /// EPSG code of the output coordinates, when the engine reports it.
    pub crs: Option<i64>,

    /// Output format reported by the engine (e.g. "GeoJSON").
    pub format: Option<String>,

    /// Resource metadata collected during execution.
    pub metadata: Value,
}

impl ExecutionResult {
    /// Creates a result holding the given collections.
    pub fn new(data: Vec<FeatureCollection>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Parses the engine's JSON envelope, decoding every feature collection.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(GeoQueryError::geojson("result envelope must be a JSON object"));
        };

        let data = match map.remove("data") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(FeatureCollection::from_geojson)
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(GeoQueryError::geojson(format!(
                    "result \"data\" must be an array, got {other}"
                )))
            }
            None => {
                return Err(GeoQueryError::geojson(
                    "result envelope has no \"data\" member",
                ))
            }
        };

        Ok(Self {
            data,
            crs: map.get("crs").and_then(Value::as_i64),
            format: map.get("format").and_then(Value::as_str).map(String::from),
            metadata: map.remove("metadata").unwrap_or(Value::Null),
        })
    }

    /// Consumes the result, keeping only the first feature collection.
    pub fn into_first_collection(self) -> Result<FeatureCollection> {
        self.data
            .into_iter()
            .next()
            .ok_or(GeoQueryError::EmptyResult)
    }
}
