//! Geometry codec tests through the public API.

use geoquery::error::GeoQueryError;
use geoquery::geometry::{self, Geometry, GeometryExt, GeometryValue, Position};
use geoquery::value::GeoValue;
use pretty_assertions::assert_eq;
use serde_json::json;

fn ring(points: &[(f64, f64)]) -> Vec<Position> {
    points.iter().map(|&(x, y)| vec![x, y]).collect()
}

#[test]
fn test_every_variant_survives_encode_decode() {
    let outer = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
    let geometries = vec![
        GeometryValue::Point(vec![23.7275, 37.9838]),
        GeometryValue::Point(vec![1.0, 2.0, 3.0]),
        GeometryValue::LineString(ring(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.5)])),
        GeometryValue::Polygon(vec![outer.clone()]),
        GeometryValue::MultiPoint(ring(&[(1.0, 1.0), (2.0, 2.0)])),
        GeometryValue::MultiLineString(vec![ring(&[(0.0, 0.0), (1.0, 1.0)])]),
        GeometryValue::MultiPolygon(vec![vec![outer.clone()], vec![outer]]),
        GeometryValue::GeometryCollection(vec![
            Geometry::new(GeometryValue::Point(vec![0.5, 0.5])),
            Geometry::new(GeometryValue::GeometryCollection(vec![Geometry::new(
                GeometryValue::MultiPoint(vec![]),
            )])),
        ]),
    ];

    for value in geometries {
        let geometry = Geometry::new(value);
        let tree = GeoValue::from(geometry.clone());
        let decoded = geometry::decode(geometry::encode(&tree)).unwrap();
        assert_eq!(decoded, tree);

        // Through text as well, the way queries and results travel.
        let text = serde_json::to_string(&geometry::encode_geometry(&geometry)).unwrap();
        let reparsed = geometry::decode_geometry(&serde_json::from_str(&text).unwrap()).unwrap();
        assert_eq!(reparsed, geometry);
    }
}

#[test]
fn test_query_tree_roundtrip() {
    let query = json!({
        "queue": [{
            "resources": [{"name": "roads", "alias": "r"}],
            "fields": ["name", {"resource": "r", "name": "the_geom"}],
            "filters": [{
                "operator": "DISTANCE",
                "arguments": [
                    {"resource": "r", "name": "the_geom"},
                    {"type": "Point", "coordinates": [2642446.5, 4577435.25]},
                    "LESS",
                    1000
                ]
            }],
            "sort": [{"name": "name", "desc": true}],
            "offset": 0,
            "limit": 100
        }],
        "format": "GeoJSON"
    });

    let decoded = geometry::decode(query.clone()).unwrap();
    assert_eq!(decoded.geometries().len(), 1);
    assert_eq!(geometry::encode(&decoded), query);
}

#[test]
fn test_open_polygon_ring_in_query_is_accepted() {
    let decoded = geometry::decode(json!({
        "filter": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]]}
    }))
    .unwrap();

    let polygon = decoded.geometries()[0];
    assert_eq!(polygon.type_name(), "Polygon");
    assert_eq!(polygon.positions().count(), 5);
}

#[test]
fn test_string_coordinates_are_malformed() {
    let err = geometry::decode(json!({"type": "Point", "coordinates": "not-a-list"})).unwrap_err();
    assert!(matches!(err, GeoQueryError::MalformedGeometry(_)));
}

#[test]
fn test_ragged_nesting_is_malformed() {
    let err = geometry::decode(json!({
        "type": "MultiLineString",
        "coordinates": [[[0.0, 0.0], [1.0, 1.0]], [0.0, 0.0]]
    }))
    .unwrap_err();
    assert!(matches!(err, GeoQueryError::MalformedGeometry(_)));
}

#[test]
fn test_geometry_wkt_for_logging() {
    let value = geometry::decode(json!({
        "type": "LineString",
        "coordinates": [[0, 0], [1.5, 2]]
    }))
    .unwrap();
    let wkt = value.as_geometry().unwrap().to_wkt().unwrap();
    assert!(wkt.starts_with("LINESTRING"));
    assert!(wkt.contains("1.5 2"));
}
