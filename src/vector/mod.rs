//! Vector invoice documents.
//!
//! The invoice is drawn with explicit text, line and rectangle operators on a
//! single A4 page, with the bank barcode embedded as an image.

mod builder;
pub mod canvas;

pub use builder::{VectorDocument, VectorDocumentBuilder};
pub use canvas::{mm_to_pt, pt_to_mm, MmCanvas, PT_PER_MM};
