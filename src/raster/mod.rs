//! Raster invoice documents.
//!
//! A rendered invoice surface is captured as one tall bitmap, scaled to the
//! page width and sliced into fixed-height pages. Every page paints the same
//! embedded image at a different vertical offset.

mod exporter;
pub mod paginate;
mod surface;

pub use exporter::{PagePlacement, RasterDocument, RasterDocumentExporter};
pub use paginate::{page_offsets, scaled_height};
pub use surface::{CaptureOptions, StaticSurface, VisualSurface};
