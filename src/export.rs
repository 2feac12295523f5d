//! Public export entry points.
//!
//! Each entry point runs its steps strictly in order: the document is
//! generated completely in memory, then the destination is asked for, then
//! the bytes are written in one call. A cancelled prompt ends the export
//! successfully with nothing written.
//!
//! Faults from any step are logged and returned as
//! [`Error::GenerationFailed`] (exports) or [`Error::PrintFailed`] (print).
//! Nothing is retried.
//!
//! ```ignore
//! use invoice_oxide::export::{ExportOutcome, InvoiceExporter};
//! use invoice_oxide::host::{FixedDestination, FsByteSink};
//!
//! let exporter = InvoiceExporter::default();
//! match exporter.export_vector(&invoice, &org, &FixedDestination::new("out.pdf"), &FsByteSink)? {
//!     ExportOutcome::Saved(path) => println!("saved {}", path.display()),
//!     ExportOutcome::Cancelled => {},
//! }
//! ```

use std::path::PathBuf;

use log::{error, info};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::host::{ByteSink, DestinationPrompt, PrintHost};
use crate::model::Invoice;
use crate::model::Organization;
use crate::print::PrintRenderer;
use crate::raster::{RasterDocumentExporter, VisualSurface};
use crate::vector::VectorDocumentBuilder;

/// How an export ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Document written to the path
    Saved(PathBuf),
    /// The destination prompt was cancelled; nothing was written
    Cancelled,
}

impl ExportOutcome {
    /// Whether a file was written.
    pub fn is_saved(&self) -> bool {
        matches!(self, ExportOutcome::Saved(_))
    }
}

/// Suggested file name with the default Finnish stem: `lasku_<id>.pdf`.
pub fn suggested_filename(invoice: &Invoice) -> String {
    filename_with_stem("lasku", invoice)
}

fn filename_with_stem(stem: &str, invoice: &Invoice) -> String {
    let id = invoice
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.chars()
                .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect::<String>()
        });
    match id {
        Some(id) => format!("{}_{}.pdf", stem, id),
        None => format!("{}.pdf", stem),
    }
}

/// Runs exports and prints against injected host capabilities.
#[derive(Debug, Clone, Default)]
pub struct InvoiceExporter {
    config: GeneratorConfig,
}

impl InvoiceExporter {
    /// Create an exporter.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Suggested file name using the configured label stem.
    pub fn suggested_filename(&self, invoice: &Invoice) -> String {
        filename_with_stem(&self.config.labels.file_stem, invoice)
    }

    /// Build the vector invoice and save it.
    pub fn export_vector<P, S>(
        &self,
        invoice: &Invoice,
        organization: &Organization,
        prompt: &P,
        sink: &S,
    ) -> Result<ExportOutcome>
    where
        P: DestinationPrompt + ?Sized,
        S: ByteSink + ?Sized,
    {
        let document = VectorDocumentBuilder::new(self.config.clone())
            .build(invoice, organization)
            .map_err(|e| generation_failure("vector document", e))?;
        self.save(&self.suggested_filename(invoice), &document.bytes, prompt, sink)
    }

    /// Capture `surface`, page it, and save the result.
    ///
    /// A capture failure aborts before the prompt is shown.
    pub fn export_raster<V, P, S>(
        &self,
        invoice: &Invoice,
        surface: &V,
        prompt: &P,
        sink: &S,
    ) -> Result<ExportOutcome>
    where
        V: VisualSurface + ?Sized,
        P: DestinationPrompt + ?Sized,
        S: ByteSink + ?Sized,
    {
        let document = RasterDocumentExporter::new(self.config.clone())
            .export(surface)
            .map_err(|e| generation_failure("raster document", e))?;
        info!("Raster export produced {} page(s)", document.page_count());
        self.save(&self.suggested_filename(invoice), &document.bytes, prompt, sink)
    }

    /// Wrap the surface markup and hand it to the print host.
    pub fn print<V, H>(&self, surface: &V, host: &H) -> Result<()>
    where
        V: VisualSurface + ?Sized,
        H: PrintHost + ?Sized,
    {
        let document = PrintRenderer::new(self.config.clone())
            .render(surface)
            .map_err(|e| print_failure("printable document", e))?;
        host.print(&document).map_err(|e| print_failure("print host", e))
    }

    fn save<P, S>(&self, suggested: &str, bytes: &[u8], prompt: &P, sink: &S) -> Result<ExportOutcome>
    where
        P: DestinationPrompt + ?Sized,
        S: ByteSink + ?Sized,
    {
        let path = match prompt
            .prompt(suggested)
            .map_err(|e| generation_failure("destination prompt", e))?
        {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => {
                info!("Export of {} cancelled", suggested);
                return Ok(ExportOutcome::Cancelled);
            },
        };

        sink.write(&path, bytes)
            .map_err(|e| generation_failure("write", e))?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(ExportOutcome::Saved(path))
    }
}

fn generation_failure(stage: &str, err: Error) -> Error {
    error!("Error generating PDF ({}): {}", stage, err);
    err.into_generation_failure()
}

fn print_failure(stage: &str, err: Error) -> Error {
    error!("Error printing ({}): {}", stage, err);
    err.into_print_failure()
}
