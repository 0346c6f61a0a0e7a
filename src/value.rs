//! Schema-free value tree with native geometries.
//!
//! Queries and feature properties are arbitrary JSON. After decoding, any
//! GeoJSON geometry inside them is held as a [`Geometry`] leaf.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::geometry::Geometry;

/// A JSON-like value whose leaves may be geometries.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GeoValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<GeoValue>),
    Object(BTreeMap<String, GeoValue>),
    Geometry(Geometry),
}

impl GeoValue {
    /// Creates an empty object.
    pub fn empty_object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// Returns true for an object with no members.
    pub fn is_empty_object(&self) -> bool {
        matches!(self, Self::Object(map) if map.is_empty())
    }

    /// Looks up a member of an object.
    pub fn get(&self, key: &str) -> Option<&GeoValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the geometry if this value is one.
    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Self::Geometry(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the string if this value is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Collects every geometry in the tree, depth first.
    pub fn geometries(&self) -> Vec<&Geometry> {
        let mut found = Vec::new();
        self.collect_geometries(&mut found);
        found
    }

    fn collect_geometries<'a>(&'a self, found: &mut Vec<&'a Geometry>) {
        match self {
            Self::Geometry(g) => found.push(g),
            Self::Array(items) => items.iter().for_each(|v| v.collect_geometries(found)),
            Self::Object(map) => map.values().for_each(|v| v.collect_geometries(found)),
            _ => {}
        }
    }
}

impl From<Geometry> for GeoValue {
    fn from(geometry: Geometry) -> Self {
        Self::Geometry(geometry)
    }
}

impl From<&str> for GeoValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for GeoValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for GeoValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for GeoValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<f64> for GeoValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}
