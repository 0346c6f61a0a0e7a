//! Run orchestration.
//!
//! Sequences one invocation: load the query, assemble the execution config,
//! validate the output target, execute, and emit. The output target is
//! checked before the engine is called, so a refused overwrite costs nothing.

use std::io::Write;

use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::{ExecutionConfig, Settings};
use crate::error::Result;
use crate::executor::{HttpExecutor, QueryExecutor};
use crate::geometry::GeometryExt;
use crate::output::Written;

/// Builds the engine client named by the settings file.
pub fn build_executor(cli: &Cli) -> Result<HttpExecutor> {
    let config_path = cli.config_path();
    debug!("Loading settings from: {}", config_path.display());

    let mut settings = Settings::load_from_file(&config_path)?;
    settings.engine.apply_env_overrides();
    HttpExecutor::new(settings.engine.endpoint()?)
}

/// Runs one query end to end.
pub async fn run<W: Write>(
    cli: &Cli,
    executor: &dyn QueryExecutor,
    console: &mut W,
) -> Result<Written> {
    let query = cli.query_source().load()?;
    for literal in query.geometries() {
        match literal.to_wkt() {
            Ok(wkt) => debug!("Query geometry literal: {}", wkt),
            Err(e) => debug!("Query geometry literal without WKT form: {}", e),
        }
    }

    let config = ExecutionConfig::new(&cli.catalog, &cli.vector_store, cli.timeout)?;
    info!("Executing query with {}", config.display_string());

    let output = cli.output_target().validate()?;

    let result = executor.execute(&config, &query).await?;
    debug!(
        "Engine returned {} collection(s), crs={:?}, format={:?}",
        result.data.len(),
        result.crs,
        result.format
    );

    let collection = result.into_first_collection()?;
    info!("Query returned {} features", collection.len());

    output.write(&collection, cli.pretty, console)
}
