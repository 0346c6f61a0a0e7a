//! GeoJSON features and feature collections.
//!
//! Query results come back from the engine as feature collections. Both
//! directions go through the geometry codec so every embedded geometry,
//! including ones nested inside properties, is converted.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{GeoQueryError, Result};
use crate::geometry::{self, Geometry};
use crate::value::GeoValue;

const FEATURE_TYPE: &str = "Feature";
const COLLECTION_TYPE: &str = "FeatureCollection";

/// A geometry with key/value properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    /// Feature identifier; the engine numbers features sequentially.
    pub id: Option<Value>,

    /// The feature geometry, `None` for GeoJSON `null`.
    pub geometry: Option<Geometry>,

    /// Non-spatial attributes.
    pub properties: BTreeMap<String, GeoValue>,
}

impl Feature {
    /// Creates a feature with the given geometry and no properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: BTreeMap::new(),
        }
    }

    /// Sets the feature identifier.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<GeoValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Parses a GeoJSON feature object.
    pub fn from_geojson(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(GeoQueryError::geojson("feature must be a JSON object"));
        };
        expect_type(&map, FEATURE_TYPE)?;

        let geometry = match map.remove("geometry") {
            None | Some(Value::Null) => None,
            Some(value) => Some(geometry::decode_geometry(&value)?),
        };

        let properties = match map.remove("properties") {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(props)) => props
                .into_iter()
                .map(|(key, value)| geometry::decode(value).map(|v| (key, v)))
                .collect::<Result<_>>()?,
            Some(other) => {
                return Err(GeoQueryError::geojson(format!(
                    "feature properties must be an object, got {other}"
                )))
            }
        };

        Ok(Self {
            id: map.remove("id"),
            geometry,
            properties,
        })
    }

    /// Encodes the feature as a GeoJSON feature object.
    pub fn to_geojson(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(FEATURE_TYPE.to_string()));
        if let Some(id) = &self.id {
            map.insert("id".to_string(), id.clone());
        }
        map.insert(
            "geometry".to_string(),
            self.geometry
                .as_ref()
                .map_or(Value::Null, geometry::encode_geometry),
        );
        map.insert(
            "properties".to_string(),
            Value::Object(
                self.properties
                    .iter()
                    .map(|(key, value)| (key.clone(), geometry::encode(value)))
                    .collect(),
            ),
        );
        Value::Object(map)
    }
}

/// An ordered sequence of features.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection from features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the collection holds no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Parses a GeoJSON feature collection.
    pub fn from_geojson(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(GeoQueryError::geojson(
                "feature collection must be a JSON object",
            ));
        };
        expect_type(&map, COLLECTION_TYPE)?;

        let Some(Value::Array(features)) = map.remove("features") else {
            return Err(GeoQueryError::geojson(
                "feature collection must have a \"features\" array",
            ));
        };

        features
            .into_iter()
            .map(Feature::from_geojson)
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Encodes the collection as a GeoJSON feature collection object.
    pub fn to_geojson(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            Value::String(COLLECTION_TYPE.to_string()),
        );
        map.insert(
            "features".to_string(),
            Value::Array(self.features.iter().map(Feature::to_geojson).collect()),
        );
        Value::Object(map)
    }
}

fn expect_type(map: &Map<String, Value>, expected: &str) -> Result<()> {
    match map.get("type").and_then(Value::as_str) {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(GeoQueryError::geojson(format!(
            "expected type \"{expected}\", found \"{found}\""
        ))),
        None => Err(GeoQueryError::geojson(format!(
            "missing \"type\" member, expected \"{expected}\""
        ))),
    }
}
