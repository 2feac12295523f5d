//! Integration tests for the export entry points against fake and
//! filesystem host capabilities.

use image::{Rgba, RgbaImage};
use invoice_oxide::{
    ByteSink, DestinationPrompt, DirectoryDestination, Error, ExportOutcome, FixedDestination,
    FsByteSink, HtmlFilePrintHost, Invoice, InvoiceExporter, InvoiceLine, InvoiceMarkup, Member,
    NoDestination, Organization, PrintHost, PrintableDocument,
};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Records every host call in order.
#[derive(Default)]
struct FakeHost {
    calls: RefCell<Vec<String>>,
    written: RefCell<Vec<(PathBuf, Vec<u8>)>>,
    printed: RefCell<Vec<PrintableDocument>>,
    answer: Option<PathBuf>,
}

impl FakeHost {
    fn answering(path: &str) -> Self {
        Self {
            answer: Some(PathBuf::from(path)),
            ..Self::default()
        }
    }
}

impl DestinationPrompt for FakeHost {
    fn prompt(&self, suggested_name: &str) -> invoice_oxide::Result<Option<PathBuf>> {
        self.calls.borrow_mut().push(format!("prompt {}", suggested_name));
        Ok(self.answer.clone())
    }
}

impl ByteSink for FakeHost {
    fn write(&self, path: &Path, bytes: &[u8]) -> invoice_oxide::Result<()> {
        self.calls.borrow_mut().push(format!("write {}", path.display()));
        self.written.borrow_mut().push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}

impl PrintHost for FakeHost {
    fn print(&self, document: &PrintableDocument) -> invoice_oxide::Result<()> {
        self.calls.borrow_mut().push("print".to_string());
        self.printed.borrow_mut().push(document.clone());
        Ok(())
    }
}

fn organization() -> Organization {
    Organization::new("Testiseura").with_bank_account("FI1410093000123458")
}

fn invoice() -> Invoice {
    Invoice::new("9")
        .with_due_date("2025-02-28")
        .with_reference("1232")
        .with_total(12.0)
        .with_line(InvoiceLine::new("Maksu", Member::new("Aino", "Ahonen"), 12.0))
}

#[test]
fn test_vector_export_prompts_then_writes() {
    let host = FakeHost::answering("/invoices/out.pdf");
    let outcome = InvoiceExporter::default()
        .export_vector(&invoice(), &organization(), &host, &host)
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Saved(PathBuf::from("/invoices/out.pdf")));
    assert_eq!(
        *host.calls.borrow(),
        vec!["prompt lasku_9.pdf".to_string(), "write /invoices/out.pdf".to_string()]
    );
    let written = host.written.borrow();
    assert!(written[0].1.starts_with(b"%PDF-"));
}

#[test]
fn test_cancelled_export_is_not_an_error() {
    let host = FakeHost::default();
    let outcome = InvoiceExporter::default()
        .export_vector(&invoice(), &organization(), &host, &host)
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert!(host.written.borrow().is_empty());
    assert_eq!(host.calls.borrow().len(), 1);
}

#[test]
fn test_empty_destination_path_is_cancel() {
    let host = FakeHost {
        answer: Some(PathBuf::new()),
        ..FakeHost::default()
    };
    let outcome = InvoiceExporter::default()
        .export_vector(&invoice(), &organization(), &host, &host)
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert!(host.written.borrow().is_empty());
    assert_eq!(*host.calls.borrow(), vec!["prompt lasku_9.pdf".to_string()]);
}

#[test]
fn test_raster_capture_failure_never_prompts() {
    let host = FakeHost::answering("/invoices/out.pdf");
    let surface = InvoiceMarkup::default().surface(&invoice(), &organization());
    let err = InvoiceExporter::default()
        .export_raster(&invoice(), &surface, &host, &host)
        .unwrap_err();
    assert!(matches!(err, Error::GenerationFailed(_)));
    assert!(host.calls.borrow().is_empty());
}

#[test]
fn test_raster_export_writes_pdf() {
    let host = FakeHost::answering("/invoices/raster.pdf");
    let surface = InvoiceMarkup::default()
        .surface(&invoice(), &organization())
        .with_bitmap(RgbaImage::from_pixel(1588, 3000, Rgba([255, 255, 255, 255])));
    let outcome = InvoiceExporter::default()
        .export_raster(&invoice(), &surface, &host, &host)
        .unwrap();
    assert!(outcome.is_saved());
    let written = host.written.borrow();
    let content = String::from_utf8_lossy(&written[0].1).to_string();
    assert!(content.contains("/Count 2"));
}

#[test]
fn test_print_hands_document_to_host() {
    let host = FakeHost::default();
    let surface = InvoiceMarkup::default().surface(&invoice(), &organization());
    InvoiceExporter::default().print(&surface, &host).unwrap();
    let printed = host.printed.borrow();
    assert_eq!(printed.len(), 1);
    assert!(printed[0].html.contains("Testiseura"));
}

#[test]
fn test_filesystem_export() {
    let dir = tempdir().unwrap();
    let outcome = InvoiceExporter::default()
        .export_vector(
            &invoice(),
            &organization(),
            &DirectoryDestination::new(dir.path()),
            &FsByteSink,
        )
        .unwrap();
    let path = dir.path().join("lasku_9.pdf");
    assert_eq!(outcome, ExportOutcome::Saved(path.clone()));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(bytes.ends_with(b"%%EOF"));
}

#[test]
fn test_filesystem_export_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("nope").join("out.pdf");
    let err = InvoiceExporter::default()
        .export_vector(&invoice(), &organization(), &FixedDestination::new(&target), &FsByteSink)
        .unwrap_err();
    assert!(err.is_coarse());
    assert!(!target.exists());
}

#[test]
fn test_no_destination_writes_nothing_to_disk() {
    let dir = tempdir().unwrap();
    let outcome = InvoiceExporter::default()
        .export_vector(&invoice(), &organization(), &NoDestination, &FsByteSink)
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_print_to_html_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lasku.html");
    let surface = InvoiceMarkup::default().surface(&invoice(), &organization());
    InvoiceExporter::default()
        .print(&surface, &HtmlFilePrintHost::new(&path))
        .unwrap();
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Lasku</title>"));
}

#[test]
fn test_print_failure_is_coarse() {
    let surface = InvoiceMarkup::default().surface(&invoice(), &organization());
    let err = InvoiceExporter::default()
        .print(&surface, &HtmlFilePrintHost::new("/nonexistent-dir-for-test/x.html"))
        .unwrap_err();
    assert!(matches!(err, Error::PrintFailed(_)));
}

#[test]
fn test_empty_destination_path_never_reaches_disk() {
    let outcome = InvoiceExporter::default()
        .export_vector(
            &invoice(),
            &organization(),
            &FixedDestination::new(PathBuf::new()),
            &FsByteSink,
        )
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
}
