//! Raster export: capture a surface, slice it into pages, assemble a PDF.

use image::RgbaImage;
use log::debug;

use super::paginate::{page_offsets, scaled_height};
use super::surface::{CaptureOptions, VisualSurface};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::vector::{mm_to_pt, MmCanvas};
use crate::writer::{ImageData, PdfWriter, PdfWriterConfig};

/// Where the captured image sits on one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// Zero-based page index
    pub index: usize,
    /// Offset of the image's top edge from the page top (mm, zero or negative)
    pub offset_mm: f32,
    /// Drawn image width (mm)
    pub width_mm: f32,
    /// Drawn image height (mm)
    pub height_mm: f32,
}

impl PagePlacement {
    /// The band of the image this page reveals, in mm from the image top.
    pub fn visible_band(&self, page_height_mm: f32) -> (f32, f32) {
        let start = -self.offset_mm;
        (start, (start + page_height_mm).min(self.height_mm))
    }
}

/// Result of a raster export.
#[derive(Debug, Clone)]
pub struct RasterDocument {
    /// Complete PDF bytes
    pub bytes: Vec<u8>,
    /// One placement per page, in page order
    pub placements: Vec<PagePlacement>,
    /// Captured bitmap
    pub capture: RgbaImage,
    /// Page height (mm)
    pub page_height_mm: f32,
}

impl RasterDocument {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.placements.len()
    }

    /// Scaled height of the captured image (mm).
    pub fn image_height_mm(&self) -> f32 {
        self.placements.first().map(|p| p.height_mm).unwrap_or(0.0)
    }

    /// The captured bitmap cut into one image per page.
    pub fn page_images(&self) -> Vec<RgbaImage> {
        let (width, height) = self.capture.dimensions();
        let image_height_mm = self.image_height_mm();
        if image_height_mm <= 0.0 {
            return Vec::new();
        }
        let px_per_mm = height as f32 / image_height_mm;

        self.placements
            .iter()
            .map(|placement| {
                let (start, end) = placement.visible_band(self.page_height_mm);
                let top = ((start * px_per_mm).round() as u32).min(height);
                let bottom = ((end * px_per_mm).round() as u32).clamp(top, height);
                image::imageops::crop_imm(&self.capture, 0, top, width, bottom - top).to_image()
            })
            .collect()
    }
}

/// Exports a visual surface as a multi-page raster PDF.
#[derive(Debug, Clone, Default)]
pub struct RasterDocumentExporter {
    config: GeneratorConfig,
}

impl RasterDocumentExporter {
    /// Create an exporter.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Capture options derived from the configuration.
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            scale: self.config.device_scale,
            width_px: self.config.capture_width_px,
            ..CaptureOptions::default()
        }
    }

    /// Capture the surface and assemble the paged document in memory.
    ///
    /// Any capture failure aborts the export before a page is produced.
    pub fn export<S: VisualSurface + ?Sized>(&self, surface: &S) -> Result<RasterDocument> {
        let page = &self.config.page;
        let options = self.capture_options();

        let capture = surface.capture(&options)?;
        let (width_px, height_px) = capture.dimensions();
        if height_px == 0 {
            return Err(Error::Capture("captured bitmap has zero height".to_string()));
        }
        let image_height_mm = scaled_height(width_px, height_px, page.width_mm)?;
        let offsets = page_offsets(image_height_mm, page.height_mm)?;
        debug!(
            "Captured {}x{} px surface, {:.1} mm tall, {} page(s)",
            width_px,
            height_px,
            image_height_mm,
            offsets.len()
        );

        let placements: Vec<PagePlacement> = offsets
            .iter()
            .enumerate()
            .map(|(index, offset)| PagePlacement {
                index,
                offset_mm: *offset,
                width_mm: page.width_mm,
                height_mm: image_height_mm,
            })
            .collect();

        let image = ImageData::from_rgba_over(&capture, [255, 255, 255])?;
        let mut writer = PdfWriter::with_config(
            PdfWriterConfig::default()
                .with_title(self.config.labels.print_title.clone())
                .with_compress(self.config.compress),
        );
        let name = writer.add_image(image);
        for placement in &placements {
            let mut canvas = MmCanvas::new(
                writer.add_page(mm_to_pt(page.width_mm), mm_to_pt(page.height_mm)),
                page.height_mm,
            );
            canvas.image(
                &name,
                0.0,
                placement.offset_mm,
                placement.width_mm,
                placement.height_mm,
            );
            canvas.finish();
        }
        let bytes = writer.finish()?;

        Ok(RasterDocument {
            bytes,
            placements,
            capture,
            page_height_mm: page.height_mm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::StaticSurface;

    /// Bitmap 794 px wide whose scaled height is `pages` A4 pages.
    fn tall_bitmap(pages: f32) -> RgbaImage {
        let height = (1123.0 * pages).round() as u32;
        RgbaImage::from_pixel(794, height, image::Rgba([200, 200, 200, 255]))
    }

    #[test]
    fn test_single_page_export() {
        let surface = StaticSurface::new("").with_bitmap(tall_bitmap(0.5));
        let doc = RasterDocumentExporter::default().export(&surface).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.placements[0].offset_mm, 0.0);
        let content = String::from_utf8_lossy(&doc.bytes).to_string();
        assert!(content.contains("/Count 1"));
    }

    #[test]
    fn test_multi_page_shares_one_image() {
        let surface = StaticSurface::new("").with_bitmap(tall_bitmap(3.5));
        let doc = RasterDocumentExporter::default().export(&surface).unwrap();
        assert_eq!(doc.page_count(), 4);
        let content = String::from_utf8_lossy(&doc.bytes).to_string();
        assert!(content.contains("/Count 4"));
        assert_eq!(content.matches("/Subtype /Image").count(), 1);
        assert_eq!(content.matches("/Im1 Do").count(), 4);
    }

    #[test]
    fn test_page_images_cover_capture() {
        let surface = StaticSurface::new("").with_bitmap(tall_bitmap(2.5));
        let doc = RasterDocumentExporter::default().export(&surface).unwrap();
        let pages = doc.page_images();
        assert_eq!(pages.len(), 3);
        let total: u32 = pages.iter().map(|p| p.height()).sum();
        assert_eq!(total, doc.capture.height());
        assert!(pages.iter().all(|p| p.width() == 794));
    }

    #[test]
    fn test_capture_failure_aborts() {
        let surface = StaticSurface::new("");
        assert!(matches!(
            RasterDocumentExporter::default().export(&surface),
            Err(Error::Capture(_))
        ));
    }

    #[test]
    fn test_zero_height_capture_fails() {
        let surface = StaticSurface::new("").with_bitmap(RgbaImage::new(794, 0));
        assert!(matches!(
            RasterDocumentExporter::default().export(&surface),
            Err(Error::Capture(_))
        ));
    }

    #[test]
    fn test_capture_options_follow_config() {
        let exporter =
            RasterDocumentExporter::new(GeneratorConfig::new().with_device_scale(3.0));
        let options = exporter.capture_options();
        assert_eq!(options.scale, 3.0);
        assert_eq!(options.width_px, 794);
    }
}
