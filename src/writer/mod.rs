//! PDF writing module for generating invoice documents.
//!
//! ## Architecture
//!
//! ```text
//! vector / raster layout
//!     ↓
//! [Table] (line-item rows)  →  [PdfWriter] + [PageBuilder] (pages, fonts, images)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ```ignore
//! use invoice_oxide::writer::{Font, PdfWriter};
//!
//! let mut writer = PdfWriter::new();
//! {
//!     let mut page = writer.add_a4_page();
//!     page.text("LASKU", 72.0, 720.0, Font::HelveticaBold, 16.0);
//!     page.finish();
//! }
//! let bytes = writer.finish()?;
//! ```

pub mod barcode;
mod content_stream;
mod font_metrics;
mod image_handler;
mod object_serializer;
mod pdf_writer;
mod table_renderer;

pub use barcode::{BarcodeGenerator, BarcodeOptions};
pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use font_metrics::{encode_win_ansi, Font};
pub use image_handler::{compress_image_data, ColorSpace, ImageData, ImageError};
pub use object_serializer::{format_number, format_real, ObjectSerializer};
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig, A4_HEIGHT_PT, A4_WIDTH_PT};
pub use table_renderer::{
    CellPosition, Table, TableCanvas, TableCell, TableLayout, TableRow, TableStyle,
};
