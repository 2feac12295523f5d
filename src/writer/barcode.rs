//! Code 128 symbol rendering for bank barcode payloads.
//!
//! The payload is a fixed-width digit string, so it is encoded with
//! character set C (digit pairs). Other input falls back to set B.
//!
//! ```ignore
//! use invoice_oxide::writer::barcode::{BarcodeGenerator, BarcodeOptions};
//!
//! let png = BarcodeGenerator::code128_png(&payload, &BarcodeOptions::default())?;
//! ```

use crate::error::{Error, Result};

/// barcoders character set prefixes.
const CHARSET_B: char = '\u{0181}';
const CHARSET_C: char = '\u{0106}';

/// Options for rendering a 1D symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeOptions {
    /// Width of the narrowest bar in pixels
    pub module_width: u32,
    /// Height of the symbol in pixels
    pub height: u32,
    /// Foreground color (RGBA)
    pub foreground: [u8; 4],
    /// Background color (RGBA)
    pub background: [u8; 4],
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            module_width: 2,
            height: 80,
            foreground: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
        }
    }
}

impl BarcodeOptions {
    /// Create new barcode options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the narrow bar width in pixels.
    pub fn module_width(mut self, width: u32) -> Self {
        self.module_width = width.max(1);
        self
    }

    /// Set the height in pixels.
    pub fn height(mut self, height: u32) -> Self {
        self.height = height.max(1);
        self
    }

    /// Set the foreground color (RGBA).
    pub fn foreground(mut self, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.foreground = [r, g, b, a];
        self
    }

    /// Set the background color (RGBA).
    pub fn background(mut self, r: u8, g: u8, b: u8, a: u8) -> Self {
        self.background = [r, g, b, a];
        self
    }
}

/// Barcode generator producing Code 128 symbols.
pub struct BarcodeGenerator;

impl BarcodeGenerator {
    /// Encode `payload` to Code 128 modules (1 = bar, 0 = space).
    ///
    /// No human-readable text is part of the symbol.
    pub fn code128_modules(payload: &str) -> Result<Vec<u8>> {
        use barcoders::sym::code128::Code128;

        if payload.is_empty() {
            return Err(Error::Barcode("empty payload".to_string()));
        }
        let barcode = Code128::new(with_charset(payload))
            .map_err(|e| Error::Barcode(format!("Code128 encoding error: {}", e)))?;
        Ok(barcode.encode())
    }

    /// Render `payload` as a Code 128 PNG image.
    pub fn code128_png(payload: &str, options: &BarcodeOptions) -> Result<Vec<u8>> {
        use barcoders::generators::image::*;

        let encoded = Self::code128_modules(payload)?;
        let image_gen = Image::PNG {
            height: options.height,
            xdim: options.module_width,
            rotation: Rotation::Zero,
            foreground: Color::new(options.foreground),
            background: Color::new(options.background),
        };

        image_gen
            .generate(&encoded)
            .map_err(|e| Error::Barcode(format!("Image generation error: {}", e)))
    }
}

/// Prefix the barcoders character set selector.
fn with_charset(payload: &str) -> String {
    let all_digits = payload.bytes().all(|b| b.is_ascii_digit());
    if all_digits && payload.len() % 2 == 0 {
        format!("{}{}", CHARSET_C, payload)
    } else {
        format!("{}{}", CHARSET_B, payload)
    }
}
