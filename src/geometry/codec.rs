//! GeoJSON codec for geometries and value trees.
//!
//! `decode` turns parsed JSON into a [`GeoValue`] tree, replacing every object
//! that looks like a GeoJSON geometry with a [`Geometry`]. `encode` is the
//! inverse. Objects that are not geometries pass through untouched, so
//! geometry literals can sit at any depth of a query.
//!
//! Variant dispatch is left to the `geojson` crate. On top of it the codec
//! enforces 2D/3D positions of one consistent dimension, line strings of at
//! least two positions and polygon rings of at least four once closed.

use geojson::{Geometry, JsonObject, Position, Value as GeometryValue};
use serde_json::Value;

use super::types::GeometryKind;
use crate::error::{GeoQueryError, Result};
use crate::value::GeoValue;

/// GeoJSON discriminator member.
pub const TYPE_KEY: &str = "type";

/// Minimum number of positions in a non-empty line string.
const MIN_LINE_POSITIONS: usize = 2;

/// Minimum number of positions in a closed linear ring.
const MIN_RING_POSITIONS: usize = 4;

/// Decodes a JSON value into a value tree, converting embedded geometries.
pub fn decode(value: Value) -> Result<GeoValue> {
    match value {
        Value::Null => Ok(GeoValue::Null),
        Value::Bool(b) => Ok(GeoValue::Bool(b)),
        Value::Number(n) => Ok(GeoValue::Number(n)),
        Value::String(s) => Ok(GeoValue::String(s)),
        Value::Array(items) => items
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>>>()
            .map(GeoValue::Array),
        Value::Object(map) => {
            if is_geometry_object(&map) {
                return decode_geometry_object(map).map(GeoValue::Geometry);
            }
            map.into_iter()
                .map(|(key, value)| decode(value).map(|v| (key, v)))
                .collect::<Result<_>>()
                .map(GeoValue::Object)
        }
    }
}

/// Encodes a value tree back into plain JSON.
pub fn encode(value: &GeoValue) -> Value {
    match value {
        GeoValue::Null => Value::Null,
        GeoValue::Bool(b) => Value::Bool(*b),
        GeoValue::Number(n) => Value::Number(n.clone()),
        GeoValue::String(s) => Value::String(s.clone()),
        GeoValue::Array(items) => Value::Array(items.iter().map(encode).collect()),
        GeoValue::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), encode(value)))
                .collect(),
        ),
        GeoValue::Geometry(geometry) => encode_geometry(geometry),
    }
}

/// Decodes a value that must be a GeoJSON geometry object.
///
/// Unlike [`decode`], anything that is not a recognised geometry is an error.
pub fn decode_geometry(value: &Value) -> Result<Geometry> {
    let map = value
        .as_object()
        .ok_or_else(|| GeoQueryError::malformed("geometry must be a JSON object"))?;
    if !is_geometry_object(map) {
        return Err(GeoQueryError::malformed(format!(
            "object with type {} is not a geometry",
            map.get(TYPE_KEY)
                .map(Value::to_string)
                .unwrap_or_else(|| "<missing>".into())
        )));
    }
    decode_geometry_object(map.clone())
}

/// Encodes a geometry as a GeoJSON geometry object, foreign members included.
pub fn encode_geometry(geometry: &Geometry) -> Value {
    Value::Object(JsonObject::from(geometry))
}

/// A known geometry type name together with its payload member.
fn is_geometry_object(map: &JsonObject) -> bool {
    map.get(TYPE_KEY)
        .and_then(Value::as_str)
        .and_then(GeometryKind::parse)
        .is_some_and(|kind| map.contains_key(kind.payload_key()))
}

fn decode_geometry_object(map: JsonObject) -> Result<Geometry> {
    let mut geometry =
        Geometry::from_json_object(map).map_err(|e| GeoQueryError::malformed(e.to_string()))?;
    let mut dimension = None;
    normalize(&mut geometry, &mut dimension)?;
    Ok(geometry)
}

/// Checks structure the `geojson` crate leaves open and closes open rings.
fn normalize(geometry: &mut Geometry, dimension: &mut Option<usize>) -> Result<()> {
    match &mut geometry.value {
        GeometryValue::Point(p) => position(p, dimension),
        GeometryValue::MultiPoint(points) => {
            points.iter().try_for_each(|p| position(p, dimension))
        }
        GeometryValue::LineString(line) => line_string(line, dimension),
        GeometryValue::MultiLineString(lines) => {
            lines.iter().try_for_each(|line| line_string(line, dimension))
        }
        GeometryValue::Polygon(rings) => polygon(rings, dimension),
        GeometryValue::MultiPolygon(polygons) => polygons
            .iter_mut()
            .try_for_each(|rings| polygon(rings, dimension)),
        GeometryValue::GeometryCollection(members) => members
            .iter_mut()
            .try_for_each(|member| normalize(member, dimension)),
    }
}

fn position(ordinates: &Position, dimension: &mut Option<usize>) -> Result<()> {
    if !(2..=3).contains(&ordinates.len()) {
        return Err(GeoQueryError::malformed(format!(
            "position must have 2 or 3 ordinates, got {}",
            ordinates.len()
        )));
    }

    match *dimension {
        Some(expected) if expected != ordinates.len() => Err(GeoQueryError::malformed(format!(
            "mixed coordinate dimensions: expected {expected}, got {}",
            ordinates.len()
        ))),
        Some(_) => Ok(()),
        None => {
            *dimension = Some(ordinates.len());
            Ok(())
        }
    }
}

fn line_string(line: &[Position], dimension: &mut Option<usize>) -> Result<()> {
    line.iter().try_for_each(|p| position(p, dimension))?;
    if !line.is_empty() && line.len() < MIN_LINE_POSITIONS {
        return Err(GeoQueryError::malformed(format!(
            "line string needs at least {MIN_LINE_POSITIONS} positions, got {}",
            line.len()
        )));
    }
    Ok(())
}

fn ring(positions: &mut Vec<Position>, dimension: &mut Option<usize>) -> Result<()> {
    positions.iter().try_for_each(|p| position(p, dimension))?;

    let open = match (positions.first(), positions.last()) {
        (Some(first), Some(last)) if first != last => Some(first.clone()),
        _ => None,
    };
    if let Some(first) = open {
        positions.push(first);
    }

    if positions.len() < MIN_RING_POSITIONS {
        return Err(GeoQueryError::malformed(format!(
            "polygon ring needs at least {MIN_RING_POSITIONS} positions once closed, got {}",
            positions.len()
        )));
    }
    Ok(())
}

fn polygon(rings: &mut [Vec<Position>], dimension: &mut Option<usize>) -> Result<()> {
    rings.iter_mut().try_for_each(|r| ring(r, dimension))
}
