//! Slicing a tall capture into fixed-height pages.

use crate::error::{Error, Result};

/// Slack for float noise when the image height is an exact page multiple.
const PAGE_EPSILON: f64 = 1e-6;

/// Height of the captured image once scaled to the page width.
pub fn scaled_height(width_px: u32, height_px: u32, page_width: f32) -> Result<f32> {
    if width_px == 0 {
        return Err(Error::Capture("captured bitmap has zero width".to_string()));
    }
    Ok(height_px as f32 * page_width / width_px as f32)
}

/// Vertical offsets at which the image is placed on successive pages.
///
/// Page `i` shows the band `[i * page_height, (i + 1) * page_height)` of the
/// image by placing it at offset `-i * page_height`. The number of pages is
/// `ceil(image_height / page_height)`, and an image no taller than a page
/// gives a single page at offset 0.
pub fn page_offsets(image_height: f32, page_height: f32) -> Result<Vec<f32>> {
    if !image_height.is_finite() || image_height <= 0.0 {
        return Err(Error::Capture(format!("invalid surface height {}", image_height)));
    }
    if !page_height.is_finite() || page_height <= 0.0 {
        return Err(Error::InvalidInput(format!("invalid page height {}", page_height)));
    }

    if image_height <= page_height {
        return Ok(vec![0.0]);
    }

    let ratio = image_height as f64 / page_height as f64;
    let pages = ((ratio - PAGE_EPSILON).ceil() as usize).max(1);
    Ok((0..pages).map(|i| -(i as f32) * page_height).collect())
}
