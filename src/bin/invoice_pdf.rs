//! Generate an invoice PDF from JSON inputs
//!
//! Usage:
//!   cargo run --release --bin invoice_pdf -- --invoice invoice.json --organization org.json
//!   cargo run --release --bin invoice_pdf -- --invoice invoice.json --organization org.json \
//!       --output lasku.pdf --print-html lasku.html --lang en
//!   cargo run --release --bin invoice_pdf -- --invoice invoice.json --organization org.json \
//!       --capture rendered.png
//!
//! Set RUST_LOG=debug to see barcode components and layout details.

use invoice_oxide::export::{ExportOutcome, InvoiceExporter};
use invoice_oxide::host::{read_file, DirectoryDestination, FixedDestination, FsByteSink, HtmlFilePrintHost};
use invoice_oxide::{
    BarcodeEncoder, DestinationPrompt, GeneratorConfig, Invoice, InvoiceMarkup, Labels, Organization,
};
use std::path::PathBuf;
use std::process::ExitCode;

struct CliConfig {
    invoice: PathBuf,
    organization: PathBuf,
    output: Option<PathBuf>,
    print_html: Option<PathBuf>,
    capture: Option<PathBuf>,
    english: bool,
    compress: bool,
    barcode_only: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut invoice = None;
        let mut organization = None;
        let mut output = None;
        let mut print_html = None;
        let mut capture = None;
        let mut english = false;
        let mut compress = false;
        let mut barcode_only = false;

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--invoice" => {
                    invoice = value.map(PathBuf::from);
                    i += 1;
                },
                "--organization" => {
                    organization = value.map(PathBuf::from);
                    i += 1;
                },
                "--output" | "-o" => {
                    output = value.map(PathBuf::from);
                    i += 1;
                },
                "--print-html" => {
                    print_html = value.map(PathBuf::from);
                    i += 1;
                },
                "--capture" => {
                    capture = value.map(PathBuf::from);
                    i += 1;
                },
                "--lang" => {
                    match value.as_deref() {
                        Some("en") => english = true,
                        Some("fi") => english = false,
                        other => return Err(format!("unsupported language {:?}", other)),
                    }
                    i += 1;
                },
                "--compress" => compress = true,
                "--barcode" => barcode_only = true,
                "--help" | "-h" => return Err(String::new()),
                other => return Err(format!("unknown argument {}", other)),
            }
            i += 1;
        }

        Ok(Self {
            invoice: invoice.ok_or("--invoice is required")?,
            organization: organization.ok_or("--organization is required")?,
            output,
            print_html,
            capture,
            english,
            compress,
            barcode_only,
        })
    }
}

fn usage() {
    eprintln!(
        "Usage: invoice_pdf --invoice <json> --organization <json> [--output <pdf>] \
         [--print-html <html>] [--capture <png>] [--lang fi|en] [--compress] [--barcode]"
    );
}

fn load<T: serde::de::DeserializeOwned>(path: &PathBuf) -> invoice_oxide::Result<T> {
    let bytes = read_file(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn run(cli: CliConfig) -> invoice_oxide::Result<()> {
    let invoice: Invoice = load(&cli.invoice)?;
    let organization: Organization = load(&cli.organization)?;

    let labels = if cli.english {
        Labels::english()
    } else {
        Labels::finnish()
    };
    let config = GeneratorConfig::new()
        .with_labels(labels)
        .with_compress(cli.compress);

    if cli.barcode_only {
        let payload = BarcodeEncoder::new()
            .with_default_account_body(config.default_account_body.clone())
            .encode(&invoice, &organization);
        println!("{}", payload);
        return Ok(());
    }

    let exporter = InvoiceExporter::new(config.clone());
    let prompt: Box<dyn DestinationPrompt> = match &cli.output {
        Some(path) => Box::new(FixedDestination::new(path.clone())),
        None => Box::new(DirectoryDestination::new(".")),
    };

    let markup = InvoiceMarkup::new(config);
    let outcome = match &cli.capture {
        Some(png) => {
            let surface = markup
                .surface(&invoice, &organization)
                .with_png(&read_file(png)?)?;
            exporter.export_raster(&invoice, &surface, prompt.as_ref(), &FsByteSink)?
        },
        None => exporter.export_vector(&invoice, &organization, prompt.as_ref(), &FsByteSink)?,
    };
    match outcome {
        ExportOutcome::Saved(path) => println!("Saved {}", path.display()),
        ExportOutcome::Cancelled => println!("Cancelled"),
    }

    if let Some(html_path) = &cli.print_html {
        let surface = markup.surface(&invoice, &organization);
        exporter.print(&surface, &HtmlFilePrintHost::new(html_path.clone()))?;
        println!("Wrote printable document {}", html_path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("Error: {}", msg);
            }
            usage();
            return ExitCode::from(2);
        },
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
