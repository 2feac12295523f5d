//! Millimetre page canvas.
//!
//! Layout code works in millimetres with the origin at the top-left corner
//! and y growing downwards. The canvas converts to PDF points on the fly.

use crate::writer::{Font, PageBuilder, PdfWriter, TableCanvas};

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Convert points to millimetres.
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

/// A page addressed in top-down millimetres.
pub struct MmCanvas<'a> {
    page: PageBuilder<'a>,
    height_mm: f32,
    /// Lowest baseline or edge drawn so far
    bottom_mm: f32,
}

impl<'a> MmCanvas<'a> {
    /// Wrap a page of the given height.
    pub fn new(page: PageBuilder<'a>, height_mm: f32) -> Self {
        Self {
            page,
            height_mm,
            bottom_mm: 0.0,
        }
    }

    fn y_pt(&self, y_mm: f32) -> f32 {
        mm_to_pt(self.height_mm - y_mm)
    }

    fn extend(&mut self, y_mm: f32) {
        if y_mm > self.bottom_mm {
            self.bottom_mm = y_mm;
        }
    }

    /// Lowest point reached by the drawing so far.
    pub fn bottom_mm(&self) -> f32 {
        self.bottom_mm
    }

    /// Left-aligned text with its baseline at `y_mm`.
    pub fn text(&mut self, text: &str, x_mm: f32, y_mm: f32, font: Font, size: f32) {
        let y = self.y_pt(y_mm);
        self.page.text(text, mm_to_pt(x_mm), y, font, size);
        self.extend(y_mm);
    }

    /// Text horizontally centred on `center_x_mm`.
    pub fn text_centered(&mut self, text: &str, center_x_mm: f32, y_mm: f32, font: Font, size: f32) {
        let half_width_mm = pt_to_mm(font.text_width(text, size)) / 2.0;
        self.text(text, center_x_mm - half_width_mm, y_mm, font, size);
    }

    /// Horizontal line at `y_mm`.
    pub fn hline(&mut self, x1_mm: f32, x2_mm: f32, y_mm: f32, line_width_mm: f32) {
        let y = self.y_pt(y_mm);
        self.page
            .line(mm_to_pt(x1_mm), y, mm_to_pt(x2_mm), y, mm_to_pt(line_width_mm));
        self.extend(y_mm);
    }

    /// Image with its top-left corner at (x_mm, y_mm).
    pub fn image(&mut self, name: &str, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) {
        let y = self.y_pt(y_mm + height_mm);
        self.page.draw_image(
            name,
            mm_to_pt(x_mm),
            y,
            mm_to_pt(width_mm),
            mm_to_pt(height_mm),
        );
        self.extend(y_mm + height_mm);
    }

    /// Finish the page.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.page.finish()
    }
}

impl TableCanvas for MmCanvas<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32) {
        let bottom = self.y_pt(y + height);
        self.page
            .fill_rect(mm_to_pt(x), bottom, mm_to_pt(width), mm_to_pt(height), gray);
        self.extend(y + height);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) {
        let bottom = self.y_pt(y + height);
        self.page.stroke_rect(
            mm_to_pt(x),
            bottom,
            mm_to_pt(width),
            mm_to_pt(height),
            mm_to_pt(line_width),
        );
        self.extend(y + height);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: Font, size: f32) {
        MmCanvas::text(self, text, x, y, font, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-4);
        assert!((mm_to_pt(210.0) - 595.28).abs() < 0.01);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let mut writer = PdfWriter::new();
        {
            let mut canvas = MmCanvas::new(writer.add_a4_page(), 297.0);
            canvas.text("A", 0.0, 297.0, Font::Helvetica, 10.0);
            canvas.fill_rect(0.0, 287.0, 10.0, 10.0, 0.5);
            assert_eq!(canvas.bottom_mm(), 297.0);
            canvas.finish();
        }
        let content = String::from_utf8_lossy(&writer.finish().unwrap()).to_string();
        assert!(content.contains("1 0 0 1 0 0 Tm"));
        assert!(content.contains("0 0 28.346 28.346 re\nf"));
    }

    #[test]
    fn test_image_box() {
        let mut writer = PdfWriter::new();
        {
            let mut canvas = MmCanvas::new(writer.add_a4_page(), 297.0);
            canvas.image("Im1", 0.0, 0.0, 210.0, 297.0);
            canvas.finish();
        }
        let content = String::from_utf8_lossy(&writer.finish().unwrap()).to_string();
        assert!(content.contains("595.276 0 0 841.89 0 0 cm\n/Im1 Do"));
    }
}
