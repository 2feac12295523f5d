//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9.
//! Coordinates are PDF user space points (origin bottom-left).

use super::font_metrics::{encode_win_ansi, Font};
use super::object_serializer::format_number;
use crate::error::Result;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(Font, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj), WinAnsi encoded on output
    ShowText(String),
    /// Set fill color gray (g)
    SetFillColorGray(f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Stroke path (S)
    Stroke,
    /// Fill path (f)
    Fill,
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    /// Operations in the stream
    operations: Vec<ContentStreamOp>,
    /// Current font and size
    current_font: Option<(Font, f32)>,
    /// Whether we're in a text object
    in_text_object: bool,
    /// Fonts referenced by this stream, in first-use order
    fonts_used: Vec<Font>,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Fonts referenced by `Tf` operators, in first-use order.
    pub fn fonts_used(&self) -> &[Font] {
        &self.fonts_used
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font for text operations.
    ///
    /// The font state persists across text objects, so a repeated font is not re-emitted.
    pub fn set_font(&mut self, font: Font, size: f32) -> &mut Self {
        if self.current_font != Some((font, size)) {
            self.op(ContentStreamOp::SetFont(font, size));
            self.current_font = Some((font, size));
            if !self.fonts_used.contains(&font) {
                self.fonts_used.push(font);
            }
        }
        self
    }

    /// Add text at a baseline position.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(text.to_string()));
        self
    }

    /// Draw an image XObject into the given box.
    pub fn draw_image(
        &mut self,
        resource_id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::Transform(width, 0.0, 0.0, height, x, y));
        self.op(ContentStreamOp::PaintXObject(resource_id.to_string()));
        self.op(ContentStreamOp::RestoreState);
        self
    }

    /// Set fill gray level (0 black, 1 white).
    pub fn set_fill_gray(&mut self, level: f32) -> &mut Self {
        self.op(ContentStreamOp::SetFillColorGray(level))
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Move to a point (start a new subpath).
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }
}

/// Content stream coordinates are written with three decimals.
fn num(value: f32) -> String {
    format_number(value as f64, 3)
}

/// Write a single operation to the buffer.
fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} cm",
            num(*a),
            num(*b),
            num(*c),
            num(*d),
            num(*e),
            num(*f)
        ),
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(font, size) => {
            write!(w, "/{} {} Tf", font.base_name(), num(*size))
        },
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => write!(
            w,
            "{} {} {} {} {} {} Tm",
            num(*a),
            num(*b),
            num(*c),
            num(*d),
            num(*e),
            num(*f)
        ),
        ContentStreamOp::ShowText(text) => {
            write!(w, "(")?;
            write_escaped_string(w, text)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::SetFillColorGray(g) => write!(w, "{} g", num(*g)),
        ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", num(*width)),
        ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", num(*x), num(*y)),
        ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", num(*x), num(*y)),
        ContentStreamOp::Rectangle(x, y, w_val, h) => {
            write!(w, "{} {} {} {} re", num(*x), num(*y), num(*w_val), num(*h))
        },
        ContentStreamOp::Stroke => write!(w, "S"),
        ContentStreamOp::Fill => write!(w, "f"),
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
    }
}

/// Write a WinAnsi encoded, escaped PDF string body.
fn write_escaped_string<W: Write>(w: &mut W, text: &str) -> std::io::Result<()> {
    for byte in encode_win_ansi(text) {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            _ => w.write_all(&[byte])?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font(Font::Helvetica, 12.0)
            .text("Hello, World!", 72.0, 720.0)
            .end_text();

        let bytes = builder.build().unwrap();
        let content = String::from_utf8_lossy(&bytes);

        assert!(content.contains("BT"));
        assert!(content.contains("/Helvetica 12 Tf"));
        assert!(content.contains("1 0 0 1 72 720 Tm"));
        assert!(content.contains("(Hello, World!) Tj"));
        assert!(content.contains("ET"));
    }

    #[test]
    fn test_bold_font_name() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font(Font::HelveticaBold, 18.0);
        let content = String::from_utf8_lossy(&builder.build().unwrap()).to_string();
        assert_eq!(content, "/Helvetica-Bold 18 Tf\n");
    }

    #[test]
    fn test_font_not_repeated() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_font(Font::Helvetica, 12.0)
            .set_font(Font::Helvetica, 12.0)
            .set_font(Font::HelveticaBold, 12.0)
            .set_font(Font::Helvetica, 12.0);
        let fonts = builder
            .operations()
            .iter()
            .filter(|op| matches!(op, ContentStreamOp::SetFont(..)))
            .count();
        assert_eq!(fonts, 3);
        assert_eq!(builder.fonts_used(), &[Font::Helvetica, Font::HelveticaBold]);
    }

    #[test]
    fn test_text_is_win_ansi_encoded() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Jäsen 5 €", 0.0, 0.0);
        let bytes = builder.build().unwrap();
        assert!(contains_bytes(&bytes, b"(J\xE4sen 5 \x80) Tj"));
    }

    #[test]
    fn test_escaped_parens() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("a (b) \\", 0.0, 0.0);
        let content = String::from_utf8_lossy(&builder.build().unwrap()).to_string();
        assert!(content.contains("(a \\(b\\) \\\\) Tj"));
    }

    #[test]
    fn test_rectangle_fill_and_stroke() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .set_fill_gray(0.96)
            .rect(56.5, 100.0, 481.89, 22.68)
            .fill()
            .set_line_width(1.5)
            .move_to(10.0, 10.0)
            .line_to(20.0, 10.0)
            .stroke();
        let content = String::from_utf8_lossy(&builder.build().unwrap()).to_string();
        assert!(content.contains("0.96 g"));
        assert!(content.contains("56.5 100 481.89 22.68 re\nf"));
        assert!(content.contains("1.5 w"));
        assert!(content.contains("10 10 m\n20 10 l\nS"));
    }

    #[test]
    fn test_draw_image_closes_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("x", 0.0, 0.0).draw_image("Im1", 10.0, 20.0, 100.0, 50.0);
        let content = String::from_utf8_lossy(&builder.build().unwrap()).to_string();
        assert!(content.contains("ET\nq\n100 0 0 50 10 20 cm\n/Im1 Do\nQ"));
    }
}
