//! Integration tests for geoquery.
//!
//! The engine is replaced by `MockExecutor`; no database or network is needed.

pub mod codec_test;
pub mod run_test;
