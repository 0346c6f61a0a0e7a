//! Output destination handling.
//!
//! An [`OutputTarget`] is validated before the query runs, so an output file
//! that must not be overwritten is rejected without paying for execution.
//! Only a [`ValidatedOutput`] can be written to.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use tracing::{debug, info};

use crate::error::{GeoQueryError, Result};
use crate::feature::FeatureCollection;

/// Indentation used for pretty GeoJSON.
const PRETTY_INDENT: &[u8] = b"    ";

/// Separator written between items of pretty GeoJSON, ahead of the line break.
const ITEM_SEPARATOR: &[u8] = b", ";

/// Where results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A GeoJSON file; an existing file is only replaced when `overwrite` is set.
    File { path: PathBuf, overwrite: bool },
    /// Standard output.
    Console,
}

impl OutputTarget {
    /// Builds the target from the `--output` and `--force` arguments.
    pub fn new(path: Option<PathBuf>, overwrite: bool) -> Self {
        match path {
            Some(path) => Self::File { path, overwrite },
            None => Self::Console,
        }
    }

    /// Checks the target can be written.
    ///
    /// An existing file without `overwrite` fails with
    /// [`GeoQueryError::OutputExists`] and is left untouched. With
    /// `overwrite`, the existing file is removed now.
    pub fn validate(self) -> Result<ValidatedOutput> {
        if let Self::File { path, overwrite } = &self {
            if path.exists() {
                if !*overwrite {
                    return Err(GeoQueryError::OutputExists(path.clone()));
                }
                info!("Removing existing output file {}", path.display());
                std::fs::remove_file(path)?;
            }
        }
        Ok(ValidatedOutput { target: self })
    }
}

/// An output target that passed validation.
#[derive(Debug)]
pub struct ValidatedOutput {
    target: OutputTarget,
}

/// What was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    File { path: PathBuf, bytes: usize },
    Console,
}

impl ValidatedOutput {
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Emits the collection.
    ///
    /// Files receive GeoJSON text. The console receives the in-memory
    /// structure itself, not GeoJSON.
    pub fn write<W: Write>(
        self,
        collection: &FeatureCollection,
        pretty: bool,
        console: &mut W,
    ) -> Result<Written> {
        match self.target {
            OutputTarget::File { path, .. } => {
                let text = render_geojson(collection, pretty)?;
                write_new_file(&path, text.as_bytes())?;
                info!(
                    "Wrote {} features ({} bytes) to {}",
                    collection.len(),
                    text.len(),
                    path.display()
                );
                Ok(Written::File {
                    path,
                    bytes: text.len(),
                })
            }
            OutputTarget::Console => {
                if pretty {
                    writeln!(console, "{collection:#?}")?;
                } else {
                    writeln!(console, "{collection:?}")?;
                }
                console.flush()?;
                Ok(Written::Console)
            }
        }
    }
}

/// Serializes a collection as GeoJSON text.
///
/// Compact by default; `pretty` indents by four spaces and uses `", "` and
/// `": "` as separators.
pub fn render_geojson(collection: &FeatureCollection, pretty: bool) -> Result<String> {
    let value = collection.to_geojson();
    if !pretty {
        return serde_json::to_string(&value)
            .map_err(|e| GeoQueryError::Io(io::Error::new(io::ErrorKind::InvalidData, e)));
    }

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter::new());
    value
        .serialize(&mut serializer)
        .map_err(|e| GeoQueryError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    String::from_utf8(buffer)
        .map_err(|e| GeoQueryError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Pretty formatter that writes `", "` before each line break between items.
struct SpacedFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl SpacedFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(PRETTY_INDENT),
        }
    }
}

impl Formatter for SpacedFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if !first {
            writer.write_all(ITEM_SEPARATOR)?;
        }
        self.inner.begin_array_value(writer, true)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if !first {
            writer.write_all(ITEM_SEPARATOR)?;
        }
        self.inner.begin_object_key(writer, true)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

/// Creates `path` and writes `bytes`; never replaces a file that appeared
/// after validation.
fn write_new_file(path: &Path, bytes: &[u8]) -> Result<()> {
    debug!("Creating output file {}", path.display());
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => GeoQueryError::OutputExists(path.to_path_buf()),
            _ => GeoQueryError::Io(e),
        })?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}
