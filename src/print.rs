//! Printable documents.
//!
//! [`PrintRenderer`] wraps the markup of a visual surface in a standalone
//! HTML document. The injected stylesheet hides everything except the
//! invoice block under print media and carries the same visual rules the
//! on-screen view uses, so printed and exported invoices look alike.

use log::debug;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::markup::escape_html;
use crate::raster::VisualSurface;

/// Visual rules of the invoice view.
pub const INVOICE_STYLES: &str = r#".invoice-pdf {
  background: white;
  color: black;
  font-family: Arial, sans-serif;
  font-size: 12px;
  line-height: 1.4;
}
.invoice-container {
  max-width: 210mm;
  min-height: 297mm;
  margin: 0 auto;
  padding: 20mm;
  box-sizing: border-box;
}
.invoice-header {
  display: flex;
  justify-content: space-between;
  align-items: flex-start;
  margin-bottom: 30px;
  border-bottom: 2px solid #333;
  padding-bottom: 20px;
}
.company-name {
  font-size: 24px;
  font-weight: bold;
  margin: 0 0 10px 0;
  color: #333;
}
.address {
  margin-bottom: 10px;
}
.contact-info {
  font-size: 11px;
  color: #666;
}
.invoice-title h2 {
  font-size: 28px;
  font-weight: bold;
  margin: 0;
  color: #333;
}
.invoice-details {
  display: flex;
  justify-content: space-between;
  margin-bottom: 30px;
}
.info-table,
.payment-table {
  border-collapse: collapse;
}
.info-table td,
.payment-table td {
  padding: 5px 10px 5px 0;
  vertical-align: top;
}
.recipient-info {
  text-align: right;
}
.recipient-info h3 {
  margin: 0 0 10px 0;
  font-size: 14px;
}
.recipient-address {
  border: 1px solid #ccc;
  padding: 15px;
  background: #f9f9f9;
  min-width: 200px;
}
.invoice-lines {
  margin-bottom: 30px;
}
.lines-table {
  width: 100%;
  border-collapse: collapse;
  border: 1px solid #ccc;
}
.lines-table th,
.lines-table td {
  border: 1px solid #ccc;
  padding: 8px;
  text-align: left;
}
.lines-table th {
  background: #f5f5f5;
  font-weight: bold;
}
.lines-table .amount {
  text-align: right;
  width: 100px;
}
.total-row {
  background: #f0f0f0;
  font-weight: bold;
}
.payment-info {
  margin-bottom: 30px;
}
.payment-info h3 {
  margin: 0 0 15px 0;
  font-size: 16px;
  border-bottom: 1px solid #ccc;
  padding-bottom: 5px;
}
.barcode-section {
  margin-bottom: 30px;
  text-align: center;
  border: 1px solid #ccc;
  padding: 15px;
  background: #f9f9f9;
}
.barcode-label {
  font-weight: bold;
  margin-bottom: 10px;
}
.barcode-svg {
  max-width: 100%;
  height: 50px;
  margin: 5px 0;
  display: block;
}
.barcode-svg text {
  display: none !important;
}
.additional-info {
  text-align: center;
  color: #666;
  font-size: 11px;
  margin-top: 30px;
}
.additional-info p {
  margin: 5px 0;
}
@media print {
  .invoice-pdf {
    font-size: 11px;
  }
  .invoice-container {
    padding: 15mm;
  }
  .company-name {
    font-size: 20px;
  }
  .invoice-title h2 {
    font-size: 24px;
  }
}
"#;

/// Print-media rules isolating the `.print-content` block.
pub const PRINT_ISOLATION_STYLES: &str = r#"@media print {
  body * { visibility: hidden; }
  .print-content, .print-content * { visibility: visible; }
  .print-content {
    position: absolute;
    left: 0;
    top: 0;
    width: 100%;
  }
}
"#;

/// Standalone markup handed to the host print facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintableDocument {
    /// Document title
    pub title: String,
    /// Complete HTML document
    pub html: String,
}

impl PrintableDocument {
    /// HTML as bytes, for hosts that print from a file.
    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }
}

/// Wraps surface markup into a printable document.
#[derive(Debug, Clone, Default)]
pub struct PrintRenderer {
    config: GeneratorConfig,
}

impl PrintRenderer {
    /// Create a renderer.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Full stylesheet injected into printable documents.
    pub fn stylesheet() -> String {
        let mut css = String::with_capacity(PRINT_ISOLATION_STYLES.len() + INVOICE_STYLES.len());
        css.push_str(PRINT_ISOLATION_STYLES);
        css.push_str(INVOICE_STYLES);
        css
    }

    /// Build the printable document for `surface`.
    ///
    /// The surface markup is embedded as is. Nothing is rasterized here.
    pub fn render<S: VisualSurface + ?Sized>(&self, surface: &S) -> Result<PrintableDocument> {
        let markup = surface.markup()?;
        if markup.trim().is_empty() {
            return Err(Error::InvalidInput("surface has no markup to print".to_string()));
        }
        let title = self.config.labels.print_title.clone();

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
        html.push_str("<style>\n");
        html.push_str(&Self::stylesheet());
        html.push_str("</style>\n</head>\n<body>\n");
        html.push_str("<div class=\"print-content\">\n");
        html.push_str(&markup);
        if !markup.ends_with('\n') {
            html.push('\n');
        }
        html.push_str("</div>\n</body>\n</html>\n");

        debug!("Printable document: {} bytes of markup", markup.len());
        Ok(PrintableDocument { title, html })
    }
}
