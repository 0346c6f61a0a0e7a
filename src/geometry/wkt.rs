//! Well-Known Text rendering.
//!
//! The query engine embeds geometry literals into SQL as WKT, so this is the
//! notation used when logging decoded literals. Rendering goes through
//! `geo-types`, which keeps x and y only.

use ::wkt::ToWkt;
use geojson::Geometry;

use super::types::GeometryExt;
use crate::error::{GeoQueryError, Result};

pub(super) fn render(geometry: &Geometry) -> Result<String> {
    if geometry.is_empty() {
        return Ok(format!("{} EMPTY", geometry.kind().wkt_keyword()));
    }

    let shape = geo_types::Geometry::<f64>::try_from(geometry.clone()).map_err(|e| {
        GeoQueryError::malformed(format!(
            "cannot render {} as WKT: {e}",
            geometry.type_name()
        ))
    })?;
    Ok(shape.wkt_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value as GeometryValue;

    fn squeeze(wkt: &str) -> String {
        wkt.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_point_wkt() {
        let point = Geometry::new(GeometryValue::Point(vec![10.0, 20.0]));
        let wkt = render(&point).unwrap();
        assert!(wkt.starts_with("POINT"));
        assert!(wkt.contains("10 20"));
    }

    #[test]
    fn test_polygon_wkt() {
        let polygon = Geometry::new(GeometryValue::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ]]));
        assert_eq!(squeeze(&render(&polygon).unwrap()), "POLYGON((00,10,11,00))");
    }

    #[test]
    fn test_third_ordinate_is_dropped() {
        let point = Geometry::new(GeometryValue::Point(vec![1.0, 2.0, 3.0]));
        assert_eq!(squeeze(&render(&point).unwrap()), "POINT(12)");
    }

    #[test]
    fn test_empty_wkt() {
        let line = Geometry::new(GeometryValue::LineString(vec![]));
        assert_eq!(render(&line).unwrap(), "LINESTRING EMPTY");

        let collection = Geometry::new(GeometryValue::GeometryCollection(vec![]));
        assert_eq!(render(&collection).unwrap(), "GEOMETRYCOLLECTION EMPTY");
    }
}
