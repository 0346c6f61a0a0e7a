//! geoquery - run JSON spatial queries and emit GeoJSON.

use clap::Parser;
use geoquery::cli::Cli;
use geoquery::error::Result;
use geoquery::{logging, runner};
use tracing::error;

/// Exit code for every failure kind.
const EXIT_FAILURE: i32 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse_normalized(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported as errors by clap but exit cleanly
            let code = if e.use_stderr() { EXIT_FAILURE } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = run(&cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("Error: {}", single_line(&e.to_string()));
        std::process::exit(EXIT_FAILURE);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log {
        logging::init_from_file(path)?;
    }

    let executor = runner::build_executor(cli)?;
    let mut stdout = std::io::stdout().lock();
    runner::run(cli, &executor, &mut stdout).await?;
    Ok(())
}

/// Folds a multi-line message (e.g. a TOML parse error) into one line.
fn single_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
