//! geoquery - run JSON spatial queries and emit GeoJSON.
//!
//! This library exposes the core modules for use by the binary and in
//! integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod feature;
pub mod geometry;
pub mod logging;
pub mod output;
pub mod query;
pub mod runner;
pub mod value;
