//! Host capabilities injected into the export entry points.
//!
//! The generators never touch dialogs, disks or printers directly. They call
//! these traits, and the filesystem implementations below cover command-line
//! use. Calls are synchronous and made in strict sequence by
//! [`crate::export::InvoiceExporter`]. Nothing here locks: two exports
//! writing the same destination concurrently must be serialized by the caller.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::print::PrintableDocument;

/// Asks where a document should be saved.
pub trait DestinationPrompt {
    /// Returns the chosen path, or `None` when the user cancelled.
    fn prompt(&self, suggested_name: &str) -> Result<Option<PathBuf>>;
}

/// Persists a complete document.
pub trait ByteSink {
    /// Write all of `bytes` to `path`. A failed write leaves no partial file.
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()>;
}

/// Hands a printable document to the host print facility.
pub trait PrintHost {
    /// Trigger printing.
    fn print(&self, document: &PrintableDocument) -> Result<()>;
}

impl<T: DestinationPrompt + ?Sized> DestinationPrompt for &T {
    fn prompt(&self, suggested_name: &str) -> Result<Option<PathBuf>> {
        (**self).prompt(suggested_name)
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &T {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        (**self).write(path, bytes)
    }
}

impl<T: PrintHost + ?Sized> PrintHost for &T {
    fn print(&self, document: &PrintableDocument) -> Result<()> {
        (**self).print(document)
    }
}

/// Always answers with the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDestination {
    path: PathBuf,
}

impl FixedDestination {
    /// Destination at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DestinationPrompt for FixedDestination {
    fn prompt(&self, _suggested_name: &str) -> Result<Option<PathBuf>> {
        Ok(Some(self.path.clone()))
    }
}

/// Saves under a directory using the suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryDestination {
    dir: PathBuf,
}

impl DirectoryDestination {
    /// Destination directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DestinationPrompt for DirectoryDestination {
    fn prompt(&self, suggested_name: &str) -> Result<Option<PathBuf>> {
        if suggested_name.is_empty() || suggested_name.contains(|c: char| c == '/' || c == '\\') {
            return Err(Error::InvalidInput(format!(
                "unusable file name {:?}",
                suggested_name
            )));
        }
        Ok(Some(self.dir.join(suggested_name)))
    }
}

/// Always cancels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDestination;

impl DestinationPrompt for NoDestination {
    fn prompt(&self, _suggested_name: &str) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// Writes through a temporary file in the destination directory, then
/// renames it into place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FsByteSink;

impl FsByteSink {
    /// Create a sink.
    pub fn new() -> Self {
        Self
    }
}

impl ByteSink for FsByteSink {
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let persistence = |e: std::io::Error| {
            Error::Persistence(format!("{}: {}", path.display(), e))
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(Error::Persistence(format!(
                "{}: directory {} does not exist",
                path.display(),
                dir.display()
            )));
        }

        let mut file = NamedTempFile::new_in(dir).map_err(persistence)?;
        file.write_all(bytes).map_err(persistence)?;
        file.as_file().sync_all().map_err(persistence)?;
        file.persist(path).map_err(|e| persistence(e.error))?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Print host that saves the printable HTML to a file instead of printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFilePrintHost {
    path: PathBuf,
}

impl HtmlFilePrintHost {
    /// Host writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PrintHost for HtmlFilePrintHost {
    fn print(&self, document: &PrintableDocument) -> Result<()> {
        FsByteSink
            .write(&self.path, document.as_bytes())
            .map_err(|e| Error::PrintHost(e.to_string()))
    }
}

/// Read a whole file, mapping failures to [`Error::Io`].
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}
