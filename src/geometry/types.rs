//! Geometry inspection helpers.
//!
//! Geometries are held as [`geojson::Geometry`] values so that bounding boxes
//! and foreign members survive a decode/encode round trip. This module adds
//! the few queries geoquery needs on top of them.

use geojson::{Geometry, Position, Value as GeometryValue};

use crate::error::Result;

/// The geometry discriminator carried in a GeoJSON `"type"` member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Parses a GeoJSON type name. Matching is case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Point" => Some(Self::Point),
            "LineString" => Some(Self::LineString),
            "Polygon" => Some(Self::Polygon),
            "MultiPoint" => Some(Self::MultiPoint),
            "MultiLineString" => Some(Self::MultiLineString),
            "MultiPolygon" => Some(Self::MultiPolygon),
            "GeometryCollection" => Some(Self::GeometryCollection),
            _ => None,
        }
    }

    /// Returns the kind of a geometry value.
    pub fn of(value: &GeometryValue) -> Self {
        match value {
            GeometryValue::Point(_) => Self::Point,
            GeometryValue::LineString(_) => Self::LineString,
            GeometryValue::Polygon(_) => Self::Polygon,
            GeometryValue::MultiPoint(_) => Self::MultiPoint,
            GeometryValue::MultiLineString(_) => Self::MultiLineString,
            GeometryValue::MultiPolygon(_) => Self::MultiPolygon,
            GeometryValue::GeometryCollection(_) => Self::GeometryCollection,
        }
    }

    /// Returns the GeoJSON type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }

    /// Name of the member holding the geometry's payload.
    pub fn payload_key(&self) -> &'static str {
        match self {
            Self::GeometryCollection => "geometries",
            _ => "coordinates",
        }
    }

    /// Returns the WKT keyword.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

/// Read-only queries on a decoded geometry.
pub trait GeometryExt {
    /// Returns the discriminator for this geometry.
    fn kind(&self) -> GeometryKind;

    /// Iterates over every position in document order.
    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_>;

    /// Renders the geometry as two-dimensional Well-Known Text.
    fn to_wkt(&self) -> Result<String>;

    /// Returns the GeoJSON type name.
    fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Returns true if the geometry holds no positions.
    fn is_empty(&self) -> bool {
        self.positions().next().is_none()
    }

    /// Coordinate dimension of the geometry, or `None` when it is empty.
    fn dimension(&self) -> Option<usize> {
        self.positions().next().map(Vec::len)
    }
}

impl GeometryExt for Geometry {
    fn kind(&self) -> GeometryKind {
        GeometryKind::of(&self.value)
    }

    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match &self.value {
            GeometryValue::Point(p) => Box::new(std::iter::once(p)),
            GeometryValue::LineString(line) | GeometryValue::MultiPoint(line) => {
                Box::new(line.iter())
            }
            GeometryValue::Polygon(rings) | GeometryValue::MultiLineString(rings) => {
                Box::new(rings.iter().flatten())
            }
            GeometryValue::MultiPolygon(polygons) => {
                Box::new(polygons.iter().flatten().flatten())
            }
            GeometryValue::GeometryCollection(members) => {
                Box::new(members.iter().flat_map(|g| g.positions()))
            }
        }
    }

    fn to_wkt(&self) -> Result<String> {
        super::wkt::render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for name in [
            "Point",
            "LineString",
            "Polygon",
            "MultiPoint",
            "MultiLineString",
            "MultiPolygon",
            "GeometryCollection",
        ] {
            let kind = GeometryKind::parse(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        assert_eq!(GeometryKind::parse("point"), None);
        assert_eq!(GeometryKind::parse("Feature"), None);
    }

    #[test]
    fn test_payload_key() {
        assert_eq!(GeometryKind::Point.payload_key(), "coordinates");
        assert_eq!(GeometryKind::GeometryCollection.payload_key(), "geometries");
    }

    #[test]
    fn test_dimension() {
        let flat = Geometry::new(GeometryValue::LineString(vec![vec![0.0, 0.0], vec![1.0, 1.0]]));
        assert_eq!(flat.dimension(), Some(2));
        assert_eq!(flat.type_name(), "LineString");

        let raised = Geometry::new(GeometryValue::Point(vec![1.0, 2.0, 3.0]));
        assert_eq!(raised.dimension(), Some(3));

        let empty = Geometry::new(GeometryValue::MultiPoint(vec![]));
        assert_eq!(empty.dimension(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_positions_walk_collections() {
        let collection = Geometry::new(GeometryValue::GeometryCollection(vec![
            Geometry::new(GeometryValue::Point(vec![1.0, 2.0])),
            Geometry::new(GeometryValue::MultiPoint(vec![vec![3.0, 4.0], vec![5.0, 6.0]])),
        ]));
        let xs: Vec<f64> = collection.positions().map(|p| p[0]).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
    }
}
