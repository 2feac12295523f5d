//! Configuration for invoice generation.

use crate::writer::barcode::BarcodeOptions;

/// Fixed page format in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    /// Page width (mm)
    pub width_mm: f32,
    /// Page height (mm)
    pub height_mm: f32,
    /// Margin used by the vector layout (mm)
    pub margin_mm: f32,
}

impl PageFormat {
    /// A4 portrait with a 20 mm margin.
    pub const A4: PageFormat = PageFormat {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 20.0,
    };

    /// Width available between the margins.
    pub fn content_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Horizontal page centre.
    pub fn center_x_mm(&self) -> f32 {
        self.width_mm / 2.0
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        Self::A4
    }
}

/// Literal labels printed on the documents.
///
/// Each field is named after the place it is printed.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub invoice_title: String,
    pub recipient_heading: String,
    pub invoice_number: String,
    pub issue_date: String,
    pub due_date: String,
    pub reference: String,
    pub description: String,
    pub member: String,
    pub amount: String,
    pub total: String,
    pub payment_heading: String,
    pub account: String,
    pub bic: String,
    pub payable: String,
    pub barcode: String,
    pub phone: String,
    pub business_id: String,
    pub thanks: String,
    pub contact: String,
    /// `<title>` of the printable document
    pub print_title: String,
    /// Stem of the suggested file name
    pub file_stem: String,
}

impl Labels {
    /// Finnish labels (default).
    pub fn finnish() -> Self {
        Self {
            invoice_title: "LASKU".to_string(),
            recipient_heading: "Laskun saaja".to_string(),
            invoice_number: "Laskun numero:".to_string(),
            issue_date: "Laskun päivämäärä:".to_string(),
            due_date: "Eräpäivä:".to_string(),
            reference: "Viitenumero:".to_string(),
            description: "Kuvaus".to_string(),
            member: "Jäsen".to_string(),
            amount: "Summa".to_string(),
            total: "Yhteensä:".to_string(),
            payment_heading: "Maksutiedot".to_string(),
            account: "Saajan tilinumero:".to_string(),
            bic: "BIC:".to_string(),
            payable: "Maksettava summa:".to_string(),
            barcode: "Pankkiviivakoodi:".to_string(),
            phone: "Puh:".to_string(),
            business_id: "Y-tunnus:".to_string(),
            thanks: "Kiitos jäsenyydestäsi!".to_string(),
            contact: "Laskua koskevissa kysymyksissä ottakaa yhteyttä:".to_string(),
            print_title: "Lasku".to_string(),
            file_stem: "lasku".to_string(),
        }
    }

    /// English labels.
    pub fn english() -> Self {
        Self {
            invoice_title: "INVOICE".to_string(),
            recipient_heading: "Bill to".to_string(),
            invoice_number: "Invoice number:".to_string(),
            issue_date: "Invoice date:".to_string(),
            due_date: "Due date:".to_string(),
            reference: "Reference:".to_string(),
            description: "Description".to_string(),
            member: "Member".to_string(),
            amount: "Amount".to_string(),
            total: "Total:".to_string(),
            payment_heading: "Payment details".to_string(),
            account: "Payee account:".to_string(),
            bic: "BIC:".to_string(),
            payable: "Amount due:".to_string(),
            barcode: "Bank barcode:".to_string(),
            phone: "Tel:".to_string(),
            business_id: "Business ID:".to_string(),
            thanks: "Thank you for your membership!".to_string(),
            contact: "Questions about this invoice:".to_string(),
            print_title: "Invoice".to_string(),
            file_stem: "invoice".to_string(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::finnish()
    }
}

/// Strings shown in place of absent data.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholders {
    /// Recipient without name or household label
    pub unnamed_recipient: String,
    /// Organization without a name
    pub organization_name: String,
    /// Organization without a bank account
    pub account: String,
    /// Any other absent value (id, dates, reference, member, description)
    pub missing: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            unnamed_recipient: "Nimetön".to_string(),
            organization_name: "Yhdistys".to_string(),
            account: "FI0000000000000000".to_string(),
            missing: "-".to_string(),
        }
    }
}

impl Placeholders {
    /// Value or the generic placeholder.
    pub fn or_missing(&self, value: Option<&str>) -> String {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.to_string(),
            None => self.missing.clone(),
        }
    }
}

/// Invoice generation configuration.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Page format for both document paths
    pub page: PageFormat,
    /// Device scale used when capturing a visual surface
    pub device_scale: f32,
    /// CSS pixel width of the captured surface
    pub capture_width_px: u32,
    /// Account body used when the organization account is not a Finnish IBAN
    pub default_account_body: String,
    /// Document labels
    pub labels: Labels,
    /// Placeholder strings
    pub placeholders: Placeholders,
    /// Flate-compress page content streams
    pub compress: bool,
    /// Barcode symbol rendering
    pub barcode: BarcodeOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            page: PageFormat::A4,
            device_scale: 2.0,
            capture_width_px: 794,
            default_account_body: crate::payment::DEFAULT_ACCOUNT_BODY.to_string(),
            labels: Labels::finnish(),
            placeholders: Placeholders::default(),
            compress: false,
            barcode: BarcodeOptions::default(),
        }
    }

    /// Set the page format.
    pub fn with_page(mut self, page: PageFormat) -> Self {
        self.page = page;
        self
    }

    /// Set the capture device scale.
    pub fn with_device_scale(mut self, scale: f32) -> Self {
        self.device_scale = scale;
        self
    }

    /// Set the capture width in CSS pixels.
    pub fn with_capture_width(mut self, width_px: u32) -> Self {
        self.capture_width_px = width_px;
        self
    }

    /// Set the fallback account body.
    pub fn with_default_account_body(mut self, body: impl Into<String>) -> Self {
        self.default_account_body = body.into();
        self
    }

    /// Set the document labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Set the placeholder strings.
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set barcode symbol options.
    pub fn with_barcode(mut self, barcode: BarcodeOptions) -> Self {
        self.barcode = barcode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.page, PageFormat::A4);
        assert_eq!(config.device_scale, 2.0);
        assert_eq!(config.capture_width_px, 794);
        assert_eq!(config.default_account_body, "1410093000123458");
        assert_eq!(config.labels.invoice_title, "LASKU");
        assert!(!config.compress);
    }

    #[test]
    fn test_page_geometry() {
        let page = PageFormat::A4;
        assert_eq!(page.content_width_mm(), 170.0);
        assert_eq!(page.center_x_mm(), 105.0);
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_labels(Labels::english())
            .with_compress(true)
            .with_device_scale(1.0);
        assert_eq!(config.labels.invoice_title, "INVOICE");
        assert!(config.compress);
        assert_eq!(config.device_scale, 1.0);
    }

    #[test]
    fn test_placeholder_policy() {
        let p = Placeholders::default();
        assert_eq!(p.unnamed_recipient, "Nimetön");
        assert_eq!(p.or_missing(None), "-");
        assert_eq!(p.or_missing(Some("  ")), "-");
        assert_eq!(p.or_missing(Some("x")), "x");
    }
}
