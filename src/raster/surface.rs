//! Visual surfaces: rendered invoice views a host can serialize or capture.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Capture parameters handed to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Device pixels per CSS pixel
    pub scale: f32,
    /// Layout width of the surface in CSS pixels
    pub width_px: u32,
    /// Background painted behind transparent content (RGBA)
    pub background: [u8; 4],
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            width_px: 794,
            background: [255, 255, 255, 255],
        }
    }
}

impl CaptureOptions {
    /// Bitmap width the host is expected to produce.
    pub fn device_width_px(&self) -> u32 {
        (self.width_px as f32 * self.scale).round() as u32
    }
}

/// A rendered view of an invoice.
///
/// Hosts implement this over whatever displays the invoice markup. Capture
/// must cover the full rendered height, not just the visible viewport.
pub trait VisualSurface {
    /// Serialized markup of the surface.
    fn markup(&self) -> Result<String>;

    /// Capture the whole surface as one bitmap.
    fn capture(&self, options: &CaptureOptions) -> Result<RgbaImage>;
}

impl<S: VisualSurface + ?Sized> VisualSurface for &S {
    fn markup(&self) -> Result<String> {
        (**self).markup()
    }

    fn capture(&self, options: &CaptureOptions) -> Result<RgbaImage> {
        (**self).capture(options)
    }
}

/// A surface backed by markup and a pre-rendered bitmap.
#[derive(Debug, Clone)]
pub struct StaticSurface {
    markup: String,
    bitmap: Option<RgbaImage>,
}

impl StaticSurface {
    /// Surface with markup only; capturing it fails.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            bitmap: None,
        }
    }

    /// Attach the rendered bitmap.
    pub fn with_bitmap(mut self, bitmap: RgbaImage) -> Self {
        self.bitmap = Some(bitmap);
        self
    }

    /// Attach a rendered bitmap from encoded PNG bytes.
    pub fn with_png(self, png: &[u8]) -> Result<Self> {
        let bitmap = image::load_from_memory_with_format(png, image::ImageFormat::Png)
            .map_err(|e| Error::Image(e.to_string()))?
            .to_rgba8();
        Ok(self.with_bitmap(bitmap))
    }
}

impl VisualSurface for StaticSurface {
    fn markup(&self) -> Result<String> {
        Ok(self.markup.clone())
    }

    fn capture(&self, _options: &CaptureOptions) -> Result<RgbaImage> {
        self.bitmap
            .clone()
            .ok_or_else(|| Error::Capture("surface has no rendered bitmap".to_string()))
    }
}
