//! Geometry model and GeoJSON codec.
//!
//! Geometries embedded in queries and results are held as
//! [`geojson::Geometry`] values and converted to and from JSON by the
//! [`codec`] functions.

pub mod codec;
mod types;
mod wkt;

pub use codec::{decode, decode_geometry, encode, encode_geometry};
pub use geojson::{Geometry, Position, Value as GeometryValue};
pub use types::{GeometryExt, GeometryKind};
