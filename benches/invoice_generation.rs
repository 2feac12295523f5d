//! Invoice generation benchmarks
//!
//! Barcode encoding, vector document building and raster slicing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{Rgba, RgbaImage};
use invoice_oxide::markup::InvoiceMarkup;
use invoice_oxide::writer::{BarcodeGenerator, BarcodeOptions};
use invoice_oxide::{
    encode, Invoice, InvoiceLine, Member, Organization, RasterDocumentExporter, StaticSurface,
    VectorDocumentBuilder,
};

fn organization() -> Organization {
    Organization::new("Kyläyhdistys ry")
        .with_street_address("Kylätie 5")
        .with_postal("12345", "Kylä")
        .with_email("hallitus@kylayhdistys.fi")
        .with_bank_account("FI14 1009 3000 1234 58")
}

fn invoice(lines: usize) -> Invoice {
    let mut invoice = Invoice::new("2025-1")
        .with_issue_date("2025-01-01")
        .with_due_date("2025-01-31")
        .with_reference("1232")
        .with_recipient("Virtasen perhe");
    for i in 0..lines {
        invoice = invoice.with_line(InvoiceLine::new(
            format!("Jäsenmaksu {}", i),
            Member::new("Ville", "Virtanen"),
            25.0,
        ));
    }
    invoice
}

fn bench_barcode(c: &mut Criterion) {
    let org = organization();
    let inv = invoice(3);
    let payload = encode(&inv, &org);

    let mut group = c.benchmark_group("barcode");
    group.bench_function("encode_payload", |b| {
        b.iter(|| encode(black_box(&inv), black_box(&org)))
    });
    group.bench_function("code128_png", |b| {
        b.iter(|| BarcodeGenerator::code128_png(black_box(&payload), &BarcodeOptions::default()))
    });
    group.finish();
}

fn bench_vector_document(c: &mut Criterion) {
    let org = organization();
    let builder = VectorDocumentBuilder::default();

    let mut group = c.benchmark_group("vector_document");
    for lines in [1usize, 10, 25] {
        let inv = invoice(lines);
        group.bench_with_input(BenchmarkId::new("build", lines), &inv, |b, inv| {
            b.iter(|| builder.build(black_box(inv), &org))
        });
    }
    group.finish();
}

fn bench_raster_export(c: &mut Criterion) {
    let exporter = RasterDocumentExporter::default();
    let markup = InvoiceMarkup::default().render(&invoice(3), &organization());

    let mut group = c.benchmark_group("raster_export");
    group.sample_size(20);
    for css_height in [1000u32, 3000] {
        let surface = StaticSurface::new(markup.clone()).with_bitmap(RgbaImage::from_pixel(
            1588,
            css_height * 2,
            Rgba([255, 255, 255, 255]),
        ));
        group.bench_with_input(BenchmarkId::new("export", css_height), &surface, |b, s| {
            b.iter(|| exporter.export(black_box(s)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_barcode, bench_vector_document, bench_raster_export);

criterion_main!(benches);
