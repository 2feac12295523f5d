//! Integration tests for the vector invoice document.
//!
//! Tests layout content, labels, metadata and file structure of the
//! generated PDF.

use invoice_oxide::{
    encode, GeneratorConfig, Invoice, InvoiceLine, Labels, Member, Organization, Placeholders,
    VectorDocument, VectorDocumentBuilder,
};

fn organization() -> Organization {
    Organization::new("Kyläyhdistys ry")
        .with_street_address("Kylätie 5")
        .with_postal("12345", "Kylä")
        .with_phone("040 123 4567")
        .with_business_id("1234567-8")
        .with_bank_account("FI14 1009 3000 1234 58")
        .with_bic("NDEAFIHH")
}

fn invoice() -> Invoice {
    Invoice::new("2025-17")
        .with_issue_date("2025-01-01")
        .with_due_date("2025-01-31")
        .with_reference("1232")
        .with_recipient("Virtasen perhe")
        .with_address("Mäkitie 2", "12345", "Kylä")
        .with_line(InvoiceLine::new("Jäsenmaksu 2025", Member::new("Ville", "Virtanen"), 25.0))
        .with_line(InvoiceLine::new("Jäsenmaksu 2025", Member::new("Veera", "Virtanen"), 15.0))
}

fn text(doc: &VectorDocument) -> String {
    String::from_utf8_lossy(&doc.bytes).to_string()
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

// =============================================================================
// LAYOUT CONTENT
// =============================================================================

mod content_tests {
    use super::*;

    #[test]
    fn test_all_sections_present() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        let content = text(&doc);
        assert!(content.contains("(Kyl\u{FFFD}yhdistys ry) Tj"));
        assert!(content.contains("(Puh: 040 123 4567) Tj"));
        assert!(content.contains("(Y-tunnus: 1234567-8) Tj"));
        assert!(content.contains("(Virtasen perhe) Tj"));
        assert!(content.contains("(2025-17) Tj"));
        assert!(content.contains("(01.01.2025) Tj"));
        assert!(content.contains("(31.01.2025) Tj"));
        assert!(content.contains("(BIC: NDEAFIHH) Tj"));
        assert!(content.contains("(25.00 \u{FFFD}) Tj"));
        assert!(content.contains("(Ville Virtanen) Tj"));
        assert!(content.contains("(Laskua koskevissa kysymyksiss\u{FFFD} ottakaa yhteytt\u{FFFD}: 040 123 4567) Tj"));
    }

    #[test]
    fn test_finnish_letters_use_win_ansi() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        assert!(contains_bytes(&doc.bytes, b"(J\xe4senmaksu 2025) Tj"));
        assert!(contains_bytes(&doc.bytes, b"(40.00 \x80) Tj"));
        assert!(contains_bytes(&doc.bytes, b"/Encoding /WinAnsiEncoding"));
    }

    #[test]
    fn test_total_row_sums_lines_without_total() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        assert!(contains_bytes(&doc.bytes, b"(Maksettava summa: 40.00 \x80) Tj"));
    }

    #[test]
    fn test_explicit_total_wins() {
        let doc = VectorDocumentBuilder::default()
            .build(&invoice().with_total(50.0), &organization())
            .unwrap();
        assert!(contains_bytes(&doc.bytes, b"(50.00 \x80) Tj"));
        assert!(!contains_bytes(&doc.bytes, b"(40.00 \x80) Tj"));
    }

    #[test]
    fn test_barcode_matches_encoder() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        assert_eq!(doc.barcode, encode(&invoice(), &organization()));
        assert!(text(&doc).contains("(Pankkiviivakoodi:) Tj"));
    }

    #[test]
    fn test_english_labels() {
        let config = GeneratorConfig::new().with_labels(Labels::english());
        let doc = VectorDocumentBuilder::new(config).build(&invoice(), &organization()).unwrap();
        let content = text(&doc);
        assert!(content.contains("(INVOICE) Tj"));
        assert!(content.contains("(Bill to) Tj"));
        assert!(content.contains("(Bank barcode:) Tj"));
        assert!(content.contains("/Title (Invoice 2025-17)"));
    }

    #[test]
    fn test_custom_placeholders() {
        let placeholders = Placeholders {
            unnamed_recipient: "Unknown".to_string(),
            missing: "n/a".to_string(),
            ..Placeholders::default()
        };
        let config = GeneratorConfig::new().with_placeholders(placeholders);
        let doc = VectorDocumentBuilder::new(config)
            .build(&Invoice::new("1"), &organization())
            .unwrap();
        let content = text(&doc);
        assert!(content.contains("(Unknown) Tj"));
        assert!(content.contains("(n/a) Tj"));
    }
}

// =============================================================================
// FILE STRUCTURE
// =============================================================================

mod structure_tests {
    use super::*;

    #[test]
    fn test_single_a4_page() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        let content = text(&doc);
        assert!(content.contains("/Count 1"));
        assert!(content.contains("/MediaBox [0 0 595.27"));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_startxref_points_at_xref() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        let content = text(&doc);
        let tail = content.rsplit("startxref\n").next().unwrap();
        let offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert_eq!(&doc.bytes[offset..offset + 4], b"xref");
    }

    #[test]
    fn test_no_timestamps_in_metadata() {
        let doc = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        let content = text(&doc);
        assert!(!content.contains("/CreationDate"));
        assert!(!content.contains("/ModDate"));
    }

    #[test]
    fn test_compressed_output() {
        let plain = VectorDocumentBuilder::default().build(&invoice(), &organization()).unwrap();
        let compressed = VectorDocumentBuilder::new(GeneratorConfig::new().with_compress(true))
            .build(&invoice(), &organization())
            .unwrap();
        assert!(compressed.bytes.len() < plain.bytes.len());
        let content = text(&compressed);
        assert!(!content.contains("(Ville Virtanen) Tj"));
        assert_eq!(compressed.barcode, plain.barcode);
    }

    #[test]
    fn test_identical_input_identical_bytes() {
        let builder = VectorDocumentBuilder::new(GeneratorConfig::new().with_compress(true));
        let first = builder.build(&invoice(), &organization()).unwrap();
        let second = builder.build(&invoice(), &organization()).unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_long_invoice_reports_overflow() {
        let mut long = invoice();
        for i in 0..30 {
            long = long.with_line(InvoiceLine::new(format!("Rivi {}", i), Member::new("A", "B"), 1.0));
        }
        let doc = VectorDocumentBuilder::default().build(&long, &organization()).unwrap();
        assert!(!doc.fits_on_page());
        assert!(doc.content_bottom_mm > doc.page_height_mm);
        assert!(text(&doc).contains("/Count 1"));
    }
}
