//! Image handling for PDF generation.
//!
//! Images are embedded as Image XObjects (PDF spec Section 8.9) with
//! Flate-compressed 8-bit samples. Alpha is carried in a separate soft
//! mask XObject.

use std::collections::HashMap;
use std::io::Write;

use crate::object::Object;

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
}

impl ColorSpace {
    /// Get the number of color components.
    pub fn components(&self) -> u8 {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }

    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }
}

/// Image data ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Color space
    pub color_space: ColorSpace,
    /// Flate-compressed samples
    pub data: Vec<u8>,
    /// Flate-compressed alpha channel, if any pixel is not opaque
    pub soft_mask: Option<Vec<u8>>,
}

impl ImageData {
    /// Load a PNG image from encoded PNG bytes.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;

        match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => {
                let gray = img.to_luma8();
                let (width, height) = gray.dimensions();
                Ok(Self {
                    width,
                    height,
                    color_space: ColorSpace::DeviceGray,
                    data: compress_image_data(gray.as_raw())?,
                    soft_mask: None,
                })
            },
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = img.to_luma_alpha8();
                let (width, height) = la.dimensions();
                let mut gray = Vec::with_capacity((width * height) as usize);
                let mut alpha = Vec::with_capacity((width * height) as usize);
                for pixel in la.pixels() {
                    gray.push(pixel.0[0]);
                    alpha.push(pixel.0[1]);
                }
                Ok(Self {
                    width,
                    height,
                    color_space: ColorSpace::DeviceGray,
                    data: compress_image_data(&gray)?,
                    soft_mask: compress_alpha(&alpha)?,
                })
            },
            _ => Self::from_rgba(&img.to_rgba8()),
        }
    }

    /// Build from an RGBA bitmap, keeping alpha as a soft mask when present.
    pub fn from_rgba(img: &image::RgbaImage) -> Result<Self, ImageError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidData(format!("empty image {}x{}", width, height)));
        }
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        let mut alpha = Vec::with_capacity((width * height) as usize);
        for pixel in img.pixels() {
            rgb.extend_from_slice(&pixel.0[..3]);
            alpha.push(pixel.0[3]);
        }
        Ok(Self {
            width,
            height,
            color_space: ColorSpace::DeviceRGB,
            data: compress_image_data(&rgb)?,
            soft_mask: compress_alpha(&alpha)?,
        })
    }

    /// Build from an RGBA bitmap composited over an opaque background.
    ///
    /// Used for captured surfaces, which are always painted on white.
    pub fn from_rgba_over(img: &image::RgbaImage, background: [u8; 3]) -> Result<Self, ImageError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidData(format!("empty image {}x{}", width, height)));
        }
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for pixel in img.pixels() {
            let alpha = pixel.0[3] as u32;
            for c in 0..3 {
                let fg = pixel.0[c] as u32;
                let bg = background[c] as u32;
                rgb.push(((fg * alpha + bg * (255 - alpha) + 127) / 255) as u8);
            }
        }
        Ok(Self {
            width,
            height,
            color_space: ColorSpace::DeviceRGB,
            data: compress_image_data(&rgb)?,
            soft_mask: None,
        })
    }

    /// Build the PDF Image XObject dictionary.
    ///
    /// The `SMask` entry is added by the writer once the mask has an object id.
    pub fn build_xobject_dict(&self) -> HashMap<String, Object> {
        let mut dict = HashMap::new();
        dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert(
            "ColorSpace".to_string(),
            Object::Name(self.color_space.pdf_name().to_string()),
        );
        dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
        dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
        dict
    }

    /// Build a soft mask (alpha channel) XObject dictionary.
    pub fn build_soft_mask_dict(&self) -> Option<HashMap<String, Object>> {
        self.soft_mask.as_ref().map(|_| {
            let mut dict = HashMap::new();
            dict.insert("Type".to_string(), Object::Name("XObject".to_string()));
            dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
            dict.insert("Width".to_string(), Object::Integer(self.width as i64));
            dict.insert("Height".to_string(), Object::Integer(self.height as i64));
            dict.insert("ColorSpace".to_string(), Object::Name("DeviceGray".to_string()));
            dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
            dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            dict
        })
    }
}

/// Image embedding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Failed to decode image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to compress image data
    #[error("Compression error: {0}")]
    CompressionError(String),

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),
}

impl From<ImageError> for crate::error::Error {
    fn from(err: ImageError) -> Self {
        crate::error::Error::Image(err.to_string())
    }
}

/// Compress image data using Flate.
pub fn compress_image_data(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ImageError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| ImageError::CompressionError(e.to_string()))
}

/// Compressed alpha channel, or `None` when fully opaque.
fn compress_alpha(alpha: &[u8]) -> Result<Option<Vec<u8>>, ImageError> {
    if alpha.iter().all(|&a| a == 255) {
        Ok(None)
    } else {
        compress_image_data(alpha).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_color_space_components() {
        assert_eq!(ColorSpace::DeviceGray.components(), 1);
        assert_eq!(ColorSpace::DeviceRGB.components(), 3);
        assert_eq!(ColorSpace::DeviceRGB.pdf_name(), "DeviceRGB");
    }

    #[test]
    fn test_opaque_rgba_has_no_soft_mask() {
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        let data = ImageData::from_rgba(&img).unwrap();
        assert_eq!((data.width, data.height), (4, 2));
        assert!(data.soft_mask.is_none());
        let raw = inflate(&data.data);
        assert_eq!(raw.len(), 4 * 2 * 3);
        assert_eq!(&raw[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_transparent_rgba_keeps_alpha() {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 128]));
        let data = ImageData::from_rgba(&img).unwrap();
        let mask = data.soft_mask.as_ref().unwrap();
        assert_eq!(inflate(mask), vec![128; 4]);
        assert!(data.build_soft_mask_dict().is_some());
    }

    #[test]
    fn test_composite_over_white() {
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        let data = ImageData::from_rgba_over(&img, [255, 255, 255]).unwrap();
        assert!(data.soft_mask.is_none());
        assert_eq!(inflate(&data.data), vec![255, 255, 255]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = image::RgbaImage::new(0, 10);
        assert!(ImageData::from_rgba(&img).is_err());
        assert!(ImageData::from_rgba_over(&img, [255, 255, 255]).is_err());
    }

    #[test]
    fn test_from_png_gray() {
        let png = png_bytes(image::DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
            3,
            1,
            image::Luma([0]),
        )));
        let data = ImageData::from_png(&png).unwrap();
        assert_eq!(data.color_space, ColorSpace::DeviceGray);
        assert_eq!(inflate(&data.data), vec![0, 0, 0]);
    }

    #[test]
    fn test_from_png_invalid() {
        assert!(matches!(ImageData::from_png(b"not a png"), Err(ImageError::DecodeError(_))));
    }

    #[test]
    fn test_xobject_dict_has_no_predictor() {
        let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
        let dict = ImageData::from_rgba(&img).unwrap().build_xobject_dict();
        assert_eq!(dict.get("Filter"), Some(&Object::Name("FlateDecode".to_string())));
        assert!(!dict.contains_key("DecodeParms"));
        assert_eq!(dict.get("BitsPerComponent"), Some(&Object::Integer(8)));
    }
}
