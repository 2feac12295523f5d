//! Vector invoice layout.
//!
//! Draws the invoice as text, lines and rectangles on a single page. Rows of
//! the line-item table push everything below them downwards; nothing is
//! broken onto a second page. Callers check [`VectorDocument::fits_on_page`].

use log::{debug, warn};

use super::canvas::{mm_to_pt, MmCanvas};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::format::{display_date, format_amount};
use crate::model::{Invoice, Organization};
use crate::payment::BarcodeEncoder;
use crate::writer::{
    BarcodeGenerator, Font, ImageData, PdfWriter, PdfWriterConfig, Table, TableCanvas, TableCell,
    TableRow, TableStyle,
};

/// Line-item column widths on a 170 mm wide table.
const COLUMN_WIDTHS_MM: [f32; 3] = [80.0, 60.0, 30.0];
/// Offset of the metadata column from the page centre.
const DETAILS_COLUMN_OFFSET_MM: f32 = 5.0;
/// Baseline of the first metadata row.
const DETAILS_TOP_MM: f32 = 30.0;
/// Distance from a metadata label to its value.
const DETAILS_VALUE_OFFSET_MM: f32 = 50.0;
/// Barcode block background height.
const BARCODE_BLOCK_MM: f32 = 20.0;
/// Barcode image size.
const BARCODE_IMAGE_MM: (f32, f32) = (100.0, 10.0);

const HEADER_GRAY: f32 = 245.0 / 255.0;
const TOTAL_GRAY: f32 = 240.0 / 255.0;
const BARCODE_GRAY: f32 = 249.0 / 255.0;

/// A generated vector document.
#[derive(Debug, Clone)]
pub struct VectorDocument {
    /// Complete PDF bytes
    pub bytes: Vec<u8>,
    /// Barcode payload drawn on the page, empty when omitted
    pub barcode: String,
    /// Lowest point of the drawn content, in mm from the page top
    pub content_bottom_mm: f32,
    /// Page height in mm
    pub page_height_mm: f32,
}

impl VectorDocument {
    /// Whether everything drawn lies on the page.
    pub fn fits_on_page(&self) -> bool {
        self.content_bottom_mm <= self.page_height_mm
    }

    /// Whether the barcode block was drawn.
    pub fn has_barcode(&self) -> bool {
        !self.barcode.is_empty()
    }
}

/// Builds invoice PDFs from explicit drawing commands.
#[derive(Debug, Clone, Default)]
pub struct VectorDocumentBuilder {
    config: GeneratorConfig,
}

impl VectorDocumentBuilder {
    /// Create a builder.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Lay out the invoice and serialize it.
    ///
    /// Identical inputs produce identical bytes.
    pub fn build(&self, invoice: &Invoice, organization: &Organization) -> Result<VectorDocument> {
        let config = &self.config;
        let payload = BarcodeEncoder::new()
            .with_default_account_body(config.default_account_body.clone())
            .encode(invoice, organization);

        let barcode_image = if payload.is_empty() {
            warn!("Barcode omitted: no valid payload for invoice {:?}", invoice.id);
            None
        } else {
            match self.render_barcode(&payload) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Barcode omitted: {}", e);
                    None
                },
            }
        };
        let barcode = if barcode_image.is_some() { payload } else { String::new() };

        let mut writer = PdfWriter::with_config(self.writer_config(invoice));
        let barcode_name = barcode_image.map(|image| writer.add_image(image));

        let page = writer.add_page(
            mm_to_pt(config.page.width_mm),
            mm_to_pt(config.page.height_mm),
        );
        let mut canvas = MmCanvas::new(page, config.page.height_mm);
        let layout = Layout { config };

        let y = layout.header(&mut canvas, organization);
        let y = layout.recipient(&mut canvas, invoice, y);
        let details_bottom = layout.details(&mut canvas, invoice);
        let y = layout.line_items(&mut canvas, invoice, y.max(details_bottom) + 10.0);
        let y = layout.payment_info(&mut canvas, invoice, organization, y + 20.0);
        let y = match &barcode_name {
            Some(name) => layout.barcode_block(&mut canvas, name, y),
            None => y,
        };
        layout.footer(&mut canvas, organization, y);

        let content_bottom_mm = canvas.bottom_mm();
        canvas.finish();
        let bytes = writer.finish()?;

        debug!(
            "Vector invoice {:?}: {} bytes, content ends at {:.1} mm",
            invoice.id,
            bytes.len(),
            content_bottom_mm
        );
        if content_bottom_mm > config.page.height_mm {
            warn!(
                "Invoice {:?} content ends at {:.1} mm, below the {} mm page",
                invoice.id, content_bottom_mm, config.page.height_mm
            );
        }

        Ok(VectorDocument {
            bytes,
            barcode,
            content_bottom_mm,
            page_height_mm: config.page.height_mm,
        })
    }

    fn render_barcode(&self, payload: &str) -> Result<ImageData> {
        let png = BarcodeGenerator::code128_png(payload, &self.config.barcode)?;
        Ok(ImageData::from_png(&png)?)
    }

    fn writer_config(&self, invoice: &Invoice) -> PdfWriterConfig {
        let label = &self.config.labels.print_title;
        let title = match invoice.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => format!("{} {}", label, id),
            None => label.clone(),
        };
        PdfWriterConfig::default()
            .with_title(title)
            .with_compress(self.config.compress)
    }
}

/// Section renderers. Each takes the running y position and returns the next.
struct Layout<'c> {
    config: &'c GeneratorConfig,
}

impl Layout<'_> {
    fn margin(&self) -> f32 {
        self.config.page.margin_mm
    }

    fn header(&self, canvas: &mut MmCanvas<'_>, org: &Organization) -> f32 {
        let labels = &self.config.labels;
        let x = self.margin();
        let mut y = self.margin();

        let name = non_empty(org.name.as_deref())
            .unwrap_or(self.config.placeholders.organization_name.as_str());
        canvas.text(name, x, y, Font::HelveticaBold, 18.0);
        canvas.text_centered(
            &labels.invoice_title,
            self.config.page.center_x_mm(),
            y,
            Font::HelveticaBold,
            16.0,
        );
        y += 8.0;

        if let Some(street) = non_empty(org.street_address.as_deref()) {
            canvas.text(street, x, y, Font::Helvetica, 12.0);
            y += 5.0;
        }
        if let Some(postal) = org.postal_line() {
            canvas.text(&postal, x, y, Font::Helvetica, 12.0);
            y += 5.0;
        }

        if let Some(phone) = non_empty(org.phone.as_deref()) {
            canvas.text(&format!("{} {}", labels.phone, phone), x, y, Font::Helvetica, 10.0);
            y += 4.0;
        }
        if let Some(email) = non_empty(org.email.as_deref()) {
            canvas.text(email, x, y, Font::Helvetica, 10.0);
            y += 4.0;
        }
        if let Some(business_id) = non_empty(org.business_id.as_deref()) {
            canvas.text(
                &format!("{} {}", labels.business_id, business_id),
                x,
                y,
                Font::Helvetica,
                10.0,
            );
            y += 4.0;
        }

        y += 10.0;
        canvas.hline(x, self.config.page.width_mm - self.margin(), y, 1.0);
        y + 15.0
    }

    fn recipient(&self, canvas: &mut MmCanvas<'_>, invoice: &Invoice, mut y: f32) -> f32 {
        let x = self.margin();
        canvas.text(&self.config.labels.recipient_heading, x, y, Font::HelveticaBold, 12.0);
        y += 7.0;

        let name = invoice
            .recipient_name()
            .unwrap_or(self.config.placeholders.unnamed_recipient.as_str());
        canvas.text(name, x, y, Font::HelveticaBold, 12.0);
        y += 5.0;

        if let Some(address) = &invoice.address {
            if let Some(street) = non_empty(address.street_address.as_deref()) {
                canvas.text(street, x, y, Font::Helvetica, 12.0);
                y += 5.0;
            }
            if let Some(postal) = address.postal_line() {
                canvas.text(&postal, x, y, Font::Helvetica, 12.0);
                y += 5.0;
            }
        }

        y + 15.0
    }

    /// Metadata column on the right, starting near the page top.
    fn details(&self, canvas: &mut MmCanvas<'_>, invoice: &Invoice) -> f32 {
        let labels = &self.config.labels;
        let missing = &self.config.placeholders;
        let x = self.config.page.center_x_mm() + DETAILS_COLUMN_OFFSET_MM;
        let mut y = DETAILS_TOP_MM;

        let rows = [
            (&labels.invoice_number, missing.or_missing(invoice.id.as_deref())),
            (
                &labels.issue_date,
                missing.or_missing(display_date(invoice.issue_date.as_deref()).as_deref()),
            ),
            (
                &labels.due_date,
                missing.or_missing(display_date(invoice.due_date.as_deref()).as_deref()),
            ),
            (&labels.reference, missing.or_missing(invoice.reference.as_deref())),
        ];

        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 {
                y += 7.0;
            }
            canvas.text(label, x, y, Font::HelveticaBold, 12.0);
            canvas.text(value, x + DETAILS_VALUE_OFFSET_MM, y, Font::Helvetica, 12.0);
        }
        y
    }

    fn line_items(&self, canvas: &mut MmCanvas<'_>, invoice: &Invoice, y: f32) -> f32 {
        let labels = &self.config.labels;
        let missing = &self.config.placeholders;
        let scale = self.config.page.content_width_mm() / COLUMN_WIDTHS_MM.iter().sum::<f32>();

        let mut table = Table::new(COLUMN_WIDTHS_MM.iter().map(|w| w * scale).collect())
            .with_style(TableStyle::default())
            .with_row(
                TableRow::header(vec![
                    TableCell::text(labels.description.as_str()),
                    TableCell::text(labels.member.as_str()),
                    TableCell::text(labels.amount.as_str()),
                ])
                .background(HEADER_GRAY),
            );

        for line in &invoice.lines {
            let member = line.member.as_ref().and_then(|m| m.full_name());
            table.add_row(TableRow::new(vec![
                TableCell::text(missing.or_missing(line.description.as_deref())),
                TableCell::text(missing.or_missing(member.as_deref())),
                TableCell::text(format_amount(line.amount_or_zero())),
            ]));
        }

        table.add_row(
            TableRow::new(vec![
                TableCell::empty(),
                TableCell::text(labels.total.as_str()).bold(),
                TableCell::text(format_amount(invoice.display_total())).bold(),
            ])
            .background(TOTAL_GRAY),
        );

        if invoice.has_total_mismatch() {
            warn!(
                "Invoice {:?} total {:?} differs from line sum {:.2}",
                invoice.id,
                invoice.total,
                invoice.line_sum()
            );
        }

        // The bottom edge of the total row is where the next section is measured from.
        table.render(canvas, self.margin(), y) - table.style.row_height
    }

    fn payment_info(
        &self,
        canvas: &mut MmCanvas<'_>,
        invoice: &Invoice,
        org: &Organization,
        mut y: f32,
    ) -> f32 {
        let labels = &self.config.labels;
        let placeholders = &self.config.placeholders;
        let x = self.margin();

        canvas.text(&labels.payment_heading, x, y, Font::HelveticaBold, 12.0);
        y += 10.0;

        let account = non_empty(org.bank_account.as_deref()).unwrap_or(placeholders.account.as_str());
        canvas.text(&format!("{} {}", labels.account, account), x, y, Font::Helvetica, 12.0);
        y += 6.0;
        if let Some(bic) = non_empty(org.bic.as_deref()) {
            canvas.text(&format!("{} {}", labels.bic, bic), x, y, Font::Helvetica, 12.0);
            y += 6.0;
        }
        let reference = placeholders.or_missing(invoice.reference.as_deref());
        canvas.text(&format!("{} {}", labels.reference, reference), x, y, Font::Helvetica, 12.0);
        y += 6.0;
        let due = placeholders.or_missing(display_date(invoice.due_date.as_deref()).as_deref());
        canvas.text(&format!("{} {}", labels.due_date, due), x, y, Font::Helvetica, 12.0);
        y += 6.0;
        canvas.text(
            &format!("{} {}", labels.payable, format_amount(invoice.display_total())),
            x,
            y,
            Font::HelveticaBold,
            12.0,
        );
        y + 15.0
    }

    fn barcode_block(&self, canvas: &mut MmCanvas<'_>, image_name: &str, y: f32) -> f32 {
        let x = self.margin();
        canvas.fill_rect(
            x,
            y,
            self.config.page.content_width_mm(),
            BARCODE_BLOCK_MM,
            BARCODE_GRAY,
        );
        canvas.text(&self.config.labels.barcode, x + 2.0, y + 5.0, Font::HelveticaBold, 12.0);
        let (width, height) = BARCODE_IMAGE_MM;
        canvas.image(image_name, x + 2.0, y + 8.0, width, height);
        y + 25.0
    }

    fn footer(&self, canvas: &mut MmCanvas<'_>, org: &Organization, y: f32) {
        let labels = &self.config.labels;
        let center = self.config.page.center_x_mm();
        canvas.text_centered(&labels.thanks, center, y + 10.0, Font::Helvetica, 10.0);
        if let Some(contact) = org.contact() {
            canvas.text_centered(
                &format!("{} {}", labels.contact, contact),
                center,
                y + 15.0,
                Font::Helvetica,
                10.0,
            );
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvoiceLine, Member};

    fn organization() -> Organization {
        Organization::new("Testiyhdistys ry")
            .with_street_address("Katu 1")
            .with_postal("00100", "Helsinki")
            .with_email("info@example.com")
            .with_bank_account("FI1410093000123458")
    }

    fn invoice() -> Invoice {
        Invoice::new("42")
            .with_issue_date("2025-01-01")
            .with_due_date("2025-01-15")
            .with_reference("14")
            .with_total(42.5)
            .with_recipient("Virtanen")
            .with_line(InvoiceLine::new("Jäsenmaksu", Member::new("Matti", "Virtanen"), 42.5))
    }

    fn content(doc: &VectorDocument) -> String {
        String::from_utf8_lossy(&doc.bytes).to_string()
    }

    #[test]
    fn test_build_basic_invoice() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        let text = content(&doc);
        assert!(text.starts_with("%PDF-1.7"));
        assert!(text.contains("(Testiyhdistys ry) Tj"));
        assert!(text.contains("(LASKU) Tj"));
        assert!(text.contains("(15.01.2025) Tj"));
        assert!(text.contains("(info@example.com) Tj"));
        assert!(doc.has_barcode());
        assert_eq!(doc.barcode.len(), 54);
        assert!(text.contains("/Im1 Do"));
        assert!(doc.fits_on_page());
    }

    #[test]
    fn test_placeholders_for_missing_data() {
        let doc = VectorDocumentBuilder::default()
            .build(&Invoice::default(), &Organization::default())
            .unwrap();
        let text = content(&doc);
        assert!(text.contains("(Yhdistys) Tj"));
        assert!(text.contains("(Nimet\u{FFFD}n) Tj"));
        assert!(text.contains("(Saajan tilinumero: FI0000000000000000) Tj"));
        assert!(text.contains("(-) Tj"));
        // Default account body, zero amount, reference "1", date "000000"
        assert_eq!(doc.barcode.len(), 54);
    }

    #[test]
    fn test_barcode_omitted_for_bad_reference() {
        let bad = invoice().with_reference("RF18 5390 0754 7034");
        let doc = VectorDocumentBuilder::default().build(&bad, &organization()).unwrap();
        assert!(!doc.has_barcode());
        let text = content(&doc);
        assert!(!text.contains("/Subtype /Image"));
        assert!(!text.contains("Pankkiviivakoodi"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let builder = VectorDocumentBuilder::default();
        let a = builder.build(&invoice(), &organization()).unwrap();
        let b = builder.build(&invoice(), &organization()).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_rows_push_content_down() {
        let builder = VectorDocumentBuilder::default();
        let short = builder.build(&invoice(), &organization()).unwrap();
        let mut long_invoice = invoice();
        for i in 0..40 {
            long_invoice = long_invoice.with_line(InvoiceLine::new(
                format!("Rivi {}", i),
                Member::new("A", "B"),
                1.0,
            ));
        }
        let long = builder.build(&long_invoice, &organization()).unwrap();
        assert!((long.content_bottom_mm - short.content_bottom_mm - 320.0).abs() < 1e-3);
        assert!(!long.fits_on_page());
    }

    #[test]
    fn test_title_metadata() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        assert!(content(&doc).contains("/Title (Lasku 42)"));
    }
}
