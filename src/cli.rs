//! Command-line argument parsing for geoquery.
//!
//! Uses clap to parse CLI arguments. Every flag has a short and a long form;
//! long forms are also accepted with a single dash (`-catalog`).

use crate::config::{Settings, DEFAULT_TIMEOUT_SECS};
use crate::output::OutputTarget;
use crate::query::QuerySource;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that are also accepted with a single leading dash.
const SINGLE_DASH_FLAGS: [&str; 9] = [
    "catalog",
    "vectorstore",
    "timeout",
    "output",
    "force",
    "pretty",
    "log",
    "input",
    "query",
];

/// Rewrites single-dash long flags (`-catalog`) to their `--catalog` form.
///
/// Only exact matches are rewritten, so short flags and stacked short flags
/// such as `-fp` pass through unchanged.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            let long = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| SINGLE_DASH_FLAGS.contains(name));
            match long {
                Some(name) => OsString::from(format!("--{name}")),
                None => arg,
            }
        })
        .collect()
}

/// Run a JSON spatial query and emit the result as GeoJSON.
#[derive(Parser, Debug)]
#[command(name = "geoquery")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Catalog database connection string
    #[arg(short = 'c', long, value_name = "CONNECTION")]
    pub catalog: String,

    /// Vector store database connection string
    #[arg(short = 'v', long = "vectorstore", value_name = "CONNECTION")]
    pub vector_store: String,

    /// Seconds before query execution times out (0 disables the limit)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        allow_negative_numbers = true
    )]
    pub timeout: i64,

    /// Write GeoJSON to this file instead of printing the result
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Indent JSON output
    #[arg(short = 'p', long)]
    pub pretty: bool,

    /// Logging configuration file; logging stays off without it
    #[arg(short = 'l', long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// File containing a JSON query
    #[arg(short = 'i', long, value_name = "PATH", conflicts_with = "query")]
    pub input: Option<PathBuf>,

    /// Literal JSON query
    #[arg(short = 'q', long, value_name = "JSON")]
    pub query: Option<String>,

    /// Settings file locating the query engine
    #[arg(long, value_name = "PATH", env = "GEOQUERY_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses arguments, accepting single-dash long flags.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    /// Returns the settings file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Settings::default_path)
    }

    /// Resolves where the query comes from.
    pub fn query_source(&self) -> QuerySource {
        QuerySource::resolve(self.input.as_deref(), self.query.as_deref())
    }

    /// Builds the (not yet validated) output target.
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::new(self.output.clone(), self.force)
    }
}
