//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer. Output is deterministic: object
//! numbers follow page, font first-use and image registration order, and no
//! timestamps are written.

use super::content_stream::{ContentStreamBuilder, ContentStreamOp};
use super::font_metrics::{encode_win_ansi, Font};
use super::image_handler::ImageData;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Object, ObjectRef};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::io::Write;

/// A4 page width in points.
pub const A4_WIDTH_PT: f32 = 595.28;
/// A4 page height in points.
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(format!("{} {}", crate::NAME, crate::VERSION)),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the creator application name.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
///
/// Coordinates are PDF points with the origin at the bottom-left corner.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.writer.pages[self.page_index].content_builder
    }

    /// Add text with its baseline starting at (x, y).
    pub fn text(&mut self, text: &str, x: f32, y: f32, font: Font, font_size: f32) -> &mut Self {
        self.content()
            .begin_text()
            .set_font(font, font_size)
            .text(text, x, y);
        self
    }

    /// Fill a rectangle with a gray level (0 black, 1 white).
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, gray: f32) -> &mut Self {
        self.content()
            .end_text()
            .op(ContentStreamOp::SaveState)
            .set_fill_gray(gray)
            .rect(x, y, width, height)
            .fill()
            .op(ContentStreamOp::RestoreState);
        self
    }

    /// Stroke a rectangle outline in black.
    pub fn stroke_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
    ) -> &mut Self {
        self.content()
            .end_text()
            .op(ContentStreamOp::SaveState)
            .set_line_width(line_width)
            .rect(x, y, width, height)
            .stroke()
            .op(ContentStreamOp::RestoreState);
        self
    }

    /// Draw a straight black line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, line_width: f32) -> &mut Self {
        self.content()
            .end_text()
            .op(ContentStreamOp::SaveState)
            .set_line_width(line_width)
            .move_to(x1, y1)
            .line_to(x2, y2)
            .stroke()
            .op(ContentStreamOp::RestoreState);
        self
    }

    /// Paint a registered image into the box with lower-left corner (x, y).
    pub fn draw_image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.content().draw_image(name, x, y, width, height);
        self
    }

    /// Finish building this page and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        let page = &mut self.writer.pages[self.page_index];
        page.content_builder.end_text();
        self.writer
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content_builder: ContentStreamBuilder,
}

impl PageData {
    /// Image resource names painted on this page.
    fn images_used(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for op in self.content_builder.operations() {
            if let ContentStreamOp::PaintXObject(name) = op {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// PDF document writer.
///
/// Builds a complete PDF document with pages, standard fonts and images.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Registered images keyed by resource name
    images: IndexMap<String, ImageData>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            images: IndexMap::new(),
        }
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page with the given dimensions in points.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content_builder: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    /// Add an A4 sized page (210mm x 297mm).
    pub fn add_a4_page(&mut self) -> PageBuilder<'_> {
        self.add_page(A4_WIDTH_PT, A4_HEIGHT_PT)
    }

    /// Register an image and return its resource name.
    ///
    /// A registered image is written once no matter how many pages paint it.
    pub fn add_image(&mut self, image: ImageData) -> String {
        let name = format!("Im{}", self.images.len() + 1);
        self.images.insert(name.clone(), image);
        name
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut next_id = 1u32;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        // Fonts in first-use order across all pages
        let mut fonts: IndexMap<Font, ObjectRef> = IndexMap::new();
        for page in &self.pages {
            for font in page.content_builder.fonts_used() {
                if !fonts.contains_key(font) {
                    fonts.insert(*font, ObjectRef::new(alloc(), 0));
                }
            }
        }

        // Images, each followed by its soft mask
        let mut image_refs: HashMap<&str, (ObjectRef, Option<ObjectRef>)> = HashMap::new();
        for (name, image) in &self.images {
            let image_ref = ObjectRef::new(alloc(), 0);
            let mask_ref = image.soft_mask.as_ref().map(|_| ObjectRef::new(alloc(), 0));
            image_refs.insert(name.as_str(), (image_ref, mask_ref));
        }

        let page_ids: Vec<(u32, u32)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();
        let info_id = alloc();
        let size = next_id;

        let mut objects: Vec<(u32, Object)> = Vec::new();

        objects.push((
            catalog_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages_id, 0)),
            ]),
        ));
        objects.push((
            pages_id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                (
                    "Kids",
                    Object::Array(
                        page_ids
                            .iter()
                            .map(|(page_id, _)| ObjectSerializer::reference(*page_id, 0))
                            .collect(),
                    ),
                ),
                ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
            ]),
        ));

        for (font, font_ref) in &fonts {
            objects.push((
                font_ref.id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Font")),
                    ("Subtype", ObjectSerializer::name("Type1")),
                    ("BaseFont", ObjectSerializer::name(font.base_name())),
                    ("Encoding", ObjectSerializer::name("WinAnsiEncoding")),
                ]),
            ));
        }

        for (name, image) in &self.images {
            let Some((image_ref, mask_ref)) = image_refs.get(name.as_str()).copied() else {
                continue;
            };
            let mut dict = image.build_xobject_dict();
            if let Some(mask_ref) = mask_ref {
                dict.insert("SMask".to_string(), Object::Reference(mask_ref));
            }
            objects.push((
                image_ref.id,
                Object::Stream {
                    dict,
                    data: bytes::Bytes::from(image.data.clone()),
                },
            ));
            if let (Some(mask_ref), Some(mask_dict), Some(mask_data)) =
                (mask_ref, image.build_soft_mask_dict(), image.soft_mask.as_ref())
            {
                objects.push((
                    mask_ref.id,
                    Object::Stream {
                        dict: mask_dict,
                        data: bytes::Bytes::from(mask_data.clone()),
                    },
                ));
            }
        }

        for (page, (page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            let raw_content = page.content_builder.build()?;
            let mut content_dict = HashMap::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), ObjectSerializer::name("FlateDecode"));
                compress_data(&raw_content)?
            } else {
                raw_content
            };

            let mut resources = vec![(
                "Font",
                Object::Dictionary(
                    fonts
                        .iter()
                        .filter(|(font, _)| page.content_builder.fonts_used().contains(*font))
                        .map(|(font, r)| (font.base_name().to_string(), Object::Reference(*r)))
                        .collect(),
                ),
            )];
            let xobjects: HashMap<String, Object> = page
                .images_used()
                .into_iter()
                .filter_map(|name| {
                    image_refs
                        .get(name)
                        .map(|(r, _)| (name.to_string(), Object::Reference(*r)))
                })
                .collect();
            if !xobjects.is_empty() {
                resources.push(("XObject", Object::Dictionary(xobjects)));
            }

            objects.push((
                *page_id,
                ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(pages_id, 0)),
                    (
                        "MediaBox",
                        ObjectSerializer::rect(
                            0.0,
                            0.0,
                            page_dimension(page.width),
                            page_dimension(page.height),
                        ),
                    ),
                    ("Contents", ObjectSerializer::reference(*content_id, 0)),
                    ("Resources", ObjectSerializer::dict(resources)),
                ]),
            ));
            objects.push((
                *content_id,
                Object::Stream {
                    dict: content_dict,
                    data: bytes::Bytes::from(content_bytes),
                },
            ));
        }

        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string_bytes(encode_win_ansi(title))));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string_bytes(encode_win_ansi(creator))));
        }
        objects.push((info_id, ObjectSerializer::dict(info_entries)));

        objects.sort_by_key(|(id, _)| *id);

        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut xref_offsets: Vec<usize> = Vec::with_capacity(objects.len());
        for (id, obj) in &objects {
            xref_offsets.push(output.len());
            output.extend_from_slice(&serializer.serialize_indirect(*id, 0, obj)?);
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(catalog_id, 0)),
            ("Info", ObjectSerializer::reference(info_id, 0)),
        ]);

        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer)?);
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        Ok(output)
    }
}

/// Page size in points, rounded to hundredths.
fn page_dimension(value: f32) -> f64 {
    (value as f64 * 100.0).round() / 100.0
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
