//! HTML view of an invoice.
//!
//! This is the markup a host displays, captures for raster export and wraps
//! for printing. Class names match [`crate::print::INVOICE_STYLES`].
//!
//! ```ignore
//! use invoice_oxide::markup::InvoiceMarkup;
//!
//! let html = InvoiceMarkup::default().render(&invoice, &organization);
//! ```

use log::warn;

use crate::config::GeneratorConfig;
use crate::format::{display_date, format_amount};
use crate::model::{Invoice, Organization};
use crate::payment::BarcodeEncoder;
use crate::raster::StaticSurface;
use crate::writer::BarcodeGenerator;

/// Height of the barcode drawing in SVG user units.
const BARCODE_SVG_HEIGHT: usize = 50;

/// Renders invoices as HTML fragments.
#[derive(Debug, Clone, Default)]
pub struct InvoiceMarkup {
    config: GeneratorConfig,
}

impl InvoiceMarkup {
    /// Create a renderer.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Render the invoice block.
    pub fn render(&self, invoice: &Invoice, organization: &Organization) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"invoice-pdf\">\n<div class=\"invoice-container\">\n");
        self.push_header(&mut html, organization);
        self.push_details(&mut html, invoice);
        self.push_lines(&mut html, invoice);
        self.push_payment(&mut html, invoice, organization);
        self.push_barcode(&mut html, invoice, organization);
        self.push_footer(&mut html, organization);
        html.push_str("</div>\n</div>\n");
        html
    }

    /// Markup-only surface for the rendered invoice.
    ///
    /// Enough for printing. Raster export also needs the host's rendered
    /// bitmap attached with [`StaticSurface::with_bitmap`].
    pub fn surface(&self, invoice: &Invoice, organization: &Organization) -> StaticSurface {
        StaticSurface::new(self.render(invoice, organization))
    }

    fn push_header(&self, html: &mut String, org: &Organization) {
        let labels = &self.config.labels;
        let name = non_empty(org.name.as_deref())
            .unwrap_or(self.config.placeholders.organization_name.as_str());

        html.push_str("<div class=\"invoice-header\">\n<div class=\"company-info\">\n");
        html.push_str(&format!("<h1 class=\"company-name\">{}</h1>\n", escape_html(name)));

        html.push_str("<div class=\"address\">\n");
        if let Some(street) = non_empty(org.street_address.as_deref()) {
            push_div(html, street);
        }
        if let Some(postal) = org.postal_line() {
            push_div(html, &postal);
        }
        html.push_str("</div>\n");

        html.push_str("<div class=\"contact-info\">\n");
        if let Some(phone) = non_empty(org.phone.as_deref()) {
            push_div(html, &format!("{} {}", labels.phone, phone));
        }
        if let Some(email) = non_empty(org.email.as_deref()) {
            push_div(html, email);
        }
        if let Some(business_id) = non_empty(org.business_id.as_deref()) {
            push_div(html, &format!("{} {}", labels.business_id, business_id));
        }
        html.push_str("</div>\n</div>\n");

        html.push_str(&format!(
            "<div class=\"invoice-title\"><h2>{}</h2></div>\n</div>\n",
            escape_html(&labels.invoice_title)
        ));
    }

    fn push_details(&self, html: &mut String, invoice: &Invoice) {
        let labels = &self.config.labels;
        let placeholders = &self.config.placeholders;

        html.push_str("<div class=\"invoice-details\">\n<table class=\"info-table\">\n");
        push_row(html, &labels.invoice_number, &placeholders.or_missing(invoice.id.as_deref()));
        push_row(
            html,
            &labels.issue_date,
            &placeholders.or_missing(display_date(invoice.issue_date.as_deref()).as_deref()),
        );
        push_row(
            html,
            &labels.due_date,
            &placeholders.or_missing(display_date(invoice.due_date.as_deref()).as_deref()),
        );
        push_row(html, &labels.reference, &placeholders.or_missing(invoice.reference.as_deref()));
        html.push_str("</table>\n");

        let name = invoice
            .recipient_name()
            .unwrap_or(placeholders.unnamed_recipient.as_str());
        html.push_str("<div class=\"recipient-info\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(&labels.recipient_heading)));
        html.push_str("<div class=\"recipient-address\">\n");
        html.push_str(&format!("<strong>{}</strong>\n", escape_html(name)));
        if let Some(address) = &invoice.address {
            if let Some(street) = non_empty(address.street_address.as_deref()) {
                push_div(html, street);
            }
            if let Some(postal) = address.postal_line() {
                push_div(html, &postal);
            }
        }
        html.push_str("</div>\n</div>\n</div>\n");
    }

    fn push_lines(&self, html: &mut String, invoice: &Invoice) {
        let labels = &self.config.labels;
        let missing = &self.config.placeholders;

        html.push_str("<div class=\"invoice-lines\">\n<table class=\"lines-table\">\n");
        html.push_str(&format!(
            "<thead><tr><th>{}</th><th>{}</th><th class=\"amount\">{}</th></tr></thead>\n<tbody>\n",
            escape_html(&labels.description),
            escape_html(&labels.member),
            escape_html(&labels.amount)
        ));
        for line in &invoice.lines {
            let member = line.member.as_ref().and_then(|m| m.full_name());
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"amount\">{}</td></tr>\n",
                escape_html(&missing.or_missing(line.description.as_deref())),
                escape_html(&missing.or_missing(member.as_deref())),
                escape_html(&format_amount(line.amount_or_zero()))
            ));
        }
        html.push_str(&format!(
            "<tr class=\"total-row\"><td></td><td>{}</td><td class=\"amount\">{}</td></tr>\n",
            escape_html(&labels.total),
            escape_html(&format_amount(invoice.display_total()))
        ));
        html.push_str("</tbody>\n</table>\n</div>\n");
    }

    fn push_payment(&self, html: &mut String, invoice: &Invoice, org: &Organization) {
        let labels = &self.config.labels;
        let placeholders = &self.config.placeholders;

        html.push_str("<div class=\"payment-info\">\n");
        html.push_str(&format!("<h3>{}</h3>\n", escape_html(&labels.payment_heading)));
        html.push_str("<table class=\"payment-table\">\n");
        let account = non_empty(org.bank_account.as_deref()).unwrap_or(placeholders.account.as_str());
        push_row(html, &labels.account, account);
        if let Some(bic) = non_empty(org.bic.as_deref()) {
            push_row(html, &labels.bic, bic);
        }
        push_row(html, &labels.reference, &placeholders.or_missing(invoice.reference.as_deref()));
        push_row(
            html,
            &labels.due_date,
            &placeholders.or_missing(display_date(invoice.due_date.as_deref()).as_deref()),
        );
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td><strong>{}</strong></td></tr>\n",
            escape_html(&labels.payable),
            escape_html(&format_amount(invoice.display_total()))
        ));
        html.push_str("</table>\n</div>\n");
    }

    fn push_barcode(&self, html: &mut String, invoice: &Invoice, org: &Organization) {
        let payload = BarcodeEncoder::new()
            .with_default_account_body(self.config.default_account_body.clone())
            .encode(invoice, org);
        if payload.is_empty() {
            return;
        }
        let svg = match barcode_svg(&payload) {
            Ok(svg) => svg,
            Err(e) => {
                warn!("Barcode omitted from markup: {}", e);
                return;
            },
        };
        html.push_str("<div class=\"barcode-section\">\n");
        html.push_str(&format!(
            "<div class=\"barcode-label\">{}</div>\n",
            escape_html(&self.config.labels.barcode)
        ));
        html.push_str(&svg);
        html.push_str("</div>\n");
    }

    fn push_footer(&self, html: &mut String, org: &Organization) {
        let labels = &self.config.labels;
        html.push_str("<div class=\"additional-info\">\n");
        html.push_str(&format!("<p>{}</p>\n", escape_html(&labels.thanks)));
        if let Some(contact) = org.contact() {
            html.push_str(&format!(
                "<p>{}</p>\n",
                escape_html(&format!("{} {}", labels.contact, contact))
            ));
        }
        html.push_str("</div>\n");
    }
}

/// Inline SVG of the Code 128 bars for `payload`, without text.
pub fn barcode_svg(payload: &str) -> crate::error::Result<String> {
    let modules = BarcodeGenerator::code128_modules(payload)?;
    let mut svg = format!(
        "<svg class=\"barcode-svg\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"none\" data-value=\"{}\">\n",
        modules.len(),
        BARCODE_SVG_HEIGHT,
        escape_html(payload)
    );
    let mut x = 0;
    while x < modules.len() {
        if modules[x] == 1 {
            let start = x;
            while x < modules.len() && modules[x] == 1 {
                x += 1;
            }
            svg.push_str(&format!(
                "<rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\"/>\n",
                start,
                x - start,
                BARCODE_SVG_HEIGHT
            ));
        } else {
            x += 1;
        }
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn push_div(html: &mut String, text: &str) {
    html.push_str(&format!("<div>{}</div>\n", escape_html(text)));
}

fn push_row(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
        escape_html(label),
        escape_html(value)
    ));
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
