//! PDF rendering: turns laid-out pages of draw commands into a
//! complete PDF 1.7 document.
//!
//! Layout coordinates are millimetres with the origin at the top-left
//! corner of the page; PDF user space is points with the origin at the
//! bottom-left. Conversion happens here so layout code never sees
//! points.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::commands::{DrawCmd, Page, TextAlign};
use crate::error::InvoiceError;
use crate::fonts::{BuiltinFont, FontMetrics};
use crate::logo::Logo;
use crate::model::InvoiceMeta;
use crate::writer::{encode_text_string, ObjId, PdfObject, PdfWriter};

const MM_TO_PT: f64 = 72.0 / 25.4;

// Fixed object numbers for the document skeleton. Content streams,
// page objects, logo XObjects, and the info dictionary are numbered
// dynamically from FIRST_DYNAMIC_OBJ onwards.
const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FONT_REGULAR_OBJ: ObjId = ObjId(3, 0);
const FONT_BOLD_OBJ: ObjId = ObjId(4, 0);
const FIRST_DYNAMIC_OBJ: u32 = 5;

const LOGO_NAME: &str = "Im1";

/// Renders pages of draw commands into PDF bytes.
///
/// The renderer is reusable: `render` borrows it immutably, so one
/// configured instance can emit any number of documents.
pub struct PdfRenderer<'a> {
    logo: Option<&'a Logo>,
    compress: bool,
    info: Vec<(String, String)>,
}

impl<'a> PdfRenderer<'a> {
    pub fn new() -> Self {
        PdfRenderer {
            logo: None,
            compress: false,
            info: Vec::new(),
        }
    }

    /// Register the logo image referenced by `DrawCmd::Image`.
    pub fn set_logo(&mut self, logo: &'a Logo) -> &mut Self {
        self.logo = Some(logo);
        self
    }

    /// Enable Flate compression of page content streams. Off by
    /// default so the emitted operators stay greppable.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Add a document information entry (Title, Author, Creator, ...).
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Write a complete PDF document for `pages` to `writer`.
    pub fn render<W: Write>(&self, pages: &[Page], writer: W) -> Result<(), InvoiceError> {
        self.render_impl(pages, writer, None)
    }

    /// Render into a fresh byte buffer.
    pub fn render_to_vec(&self, pages: &[Page]) -> Result<Vec<u8>, InvoiceError> {
        let mut buf = Vec::new();
        self.render_impl(pages, &mut buf, None)?;
        Ok(buf)
    }

    /// Render to `<dir>/<sanitized invoice number>.pdf`, creating the
    /// directory if needed. Sets the document Title from the invoice
    /// number unless the caller already set one.
    pub fn save_to_dir<P: AsRef<Path>>(
        &self,
        pages: &[Page],
        meta: &InvoiceMeta,
        dir: P,
    ) -> Result<PathBuf, InvoiceError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(output_filename(&meta.number));

        let number = meta.number.trim();
        let title = if number.is_empty() {
            "Invoice".to_string()
        } else {
            format!("Invoice {}", number)
        };

        let file = fs::File::create(&path)?;
        self.render_impl(pages, io::BufWriter::new(file), Some(title))?;
        info!(path = %path.display(), pages = pages.len(), "invoice pdf written");
        Ok(path)
    }

    fn render_impl<W: Write>(
        &self,
        pages: &[Page],
        writer: W,
        extra_title: Option<String>,
    ) -> Result<(), InvoiceError> {
        let mut w = PdfWriter::new(writer);
        w.write_header()?;

        w.write_object(FONT_REGULAR_OBJ, &font_object(BuiltinFont::Helvetica))?;
        w.write_object(FONT_BOLD_OBJ, &font_object(BuiltinFont::HelveticaBold))?;

        let mut next_obj = FIRST_DYNAMIC_OBJ;

        let logo_id = match self.logo {
            Some(logo) => {
                let image_id = ObjId(next_obj, 0);
                next_obj += 1;
                let smask_id = logo.alpha.as_ref().map(|_| {
                    let id = ObjId(next_obj, 0);
                    next_obj += 1;
                    id
                });
                write_logo_objects(&mut w, logo, image_id, smask_id)?;
                Some(image_id)
            }
            None => None,
        };

        let mut resource_entries = vec![(
            "Font",
            PdfObject::dict(vec![
                ("F1", PdfObject::reference(FONT_REGULAR_OBJ)),
                ("F2", PdfObject::reference(FONT_BOLD_OBJ)),
            ]),
        )];
        if let Some(id) = logo_id {
            resource_entries.push((
                "XObject",
                PdfObject::dict(vec![(LOGO_NAME, PdfObject::reference(id))]),
            ));
        }
        let resources = PdfObject::dict(resource_entries);

        let mut page_ids = Vec::with_capacity(pages.len());
        for page in pages {
            let ops = self.page_content(page);
            let stream = if self.compress {
                let data = flate_compress(&ops)?;
                PdfObject::stream(vec![("Filter", PdfObject::name("FlateDecode"))], data)
            } else {
                PdfObject::stream(vec![], ops)
            };
            let content_id = ObjId(next_obj, 0);
            next_obj += 1;
            w.write_object(content_id, &stream)?;

            let page_id = ObjId(next_obj, 0);
            next_obj += 1;
            let page_obj = PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PdfObject::reference(PAGES_OBJ)),
                (
                    "MediaBox",
                    PdfObject::array(vec![
                        PdfObject::Integer(0),
                        PdfObject::Integer(0),
                        PdfObject::Real(page.width * MM_TO_PT),
                        PdfObject::Real(page.height * MM_TO_PT),
                    ]),
                ),
                ("Resources", resources.clone()),
                ("Contents", PdfObject::reference(content_id)),
            ]);
            w.write_object(page_id, &page_obj)?;
            page_ids.push(page_id);
        }

        let kids = page_ids.iter().map(|&id| PdfObject::reference(id)).collect();
        let pages_obj = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::array(kids)),
            ("Count", PdfObject::Integer(page_ids.len() as i64)),
        ]);
        w.write_object(PAGES_OBJ, &pages_obj)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::reference(PAGES_OBJ)),
        ]);
        w.write_object(CATALOG_OBJ, &catalog)?;

        let mut info_entries = self.info.clone();
        if let Some(title) = extra_title {
            if !info_entries.iter().any(|(k, _)| k == "Title") {
                info_entries.push(("Title".to_string(), title));
            }
        }
        let info_id = if info_entries.is_empty() {
            None
        } else {
            let id = ObjId(next_obj, 0);
            let entries = info_entries
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            w.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        w.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        debug!(
            bytes = w.current_offset(),
            pages = pages.len(),
            compressed = self.compress,
            "pdf emitted"
        );

        let mut inner = w.into_inner();
        inner.flush()?;
        Ok(())
    }

    /// Translate one page of draw commands into content-stream ops.
    fn page_content(&self, page: &Page) -> Vec<u8> {
        let mut ops = Vec::new();
        for cmd in &page.commands {
            match cmd {
                DrawCmd::Text {
                    x,
                    y,
                    content,
                    font,
                    size,
                    color,
                    align,
                } => {
                    let anchor = x * MM_TO_PT;
                    let width = FontMetrics::measure_text(content, *font, *size);
                    let tx = match align {
                        TextAlign::Left => anchor,
                        TextAlign::Center => anchor - width / 2.0,
                        TextAlign::Right => anchor - width,
                    };
                    let ty = (page.height - y) * MM_TO_PT;
                    push_str(
                        &mut ops,
                        &format!(
                            "BT\n/{} {} Tf\n{} {} {} rg\n{} {} Td\n(",
                            font.pdf_name(),
                            format_coord(*size),
                            format_coord(color.r),
                            format_coord(color.g),
                            format_coord(color.b),
                            format_coord(tx),
                            format_coord(ty),
                        ),
                    );
                    ops.extend_from_slice(&encode_text_string(content));
                    push_str(&mut ops, ") Tj\nET\n");
                }
                DrawCmd::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let px = x * MM_TO_PT;
                    let py = (page.height - (y + height)) * MM_TO_PT;
                    let pw = width * MM_TO_PT;
                    let ph = height * MM_TO_PT;
                    if let Some(c) = fill {
                        push_str(
                            &mut ops,
                            &format!(
                                "{} {} {} rg\n",
                                format_coord(c.r),
                                format_coord(c.g),
                                format_coord(c.b)
                            ),
                        );
                    }
                    if let Some(s) = stroke {
                        push_str(
                            &mut ops,
                            &format!(
                                "{} {} {} RG\n{} w\n",
                                format_coord(s.color.r),
                                format_coord(s.color.g),
                                format_coord(s.color.b),
                                format_coord(s.width * MM_TO_PT)
                            ),
                        );
                    }
                    push_str(
                        &mut ops,
                        &format!(
                            "{} {} {} {} re\n",
                            format_coord(px),
                            format_coord(py),
                            format_coord(pw),
                            format_coord(ph)
                        ),
                    );
                    let paint = match (fill, stroke) {
                        (Some(_), Some(_)) => "B",
                        (Some(_), None) => "f",
                        (None, Some(_)) => "S",
                        (None, None) => "n",
                    };
                    push_str(&mut ops, paint);
                    push_str(&mut ops, "\n");
                }
                DrawCmd::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                } => {
                    push_str(
                        &mut ops,
                        &format!(
                            "{} {} {} RG\n{} w\n{} {} m\n{} {} l\nS\n",
                            format_coord(stroke.color.r),
                            format_coord(stroke.color.g),
                            format_coord(stroke.color.b),
                            format_coord(stroke.width * MM_TO_PT),
                            format_coord(x1 * MM_TO_PT),
                            format_coord((page.height - y1) * MM_TO_PT),
                            format_coord(x2 * MM_TO_PT),
                            format_coord((page.height - y2) * MM_TO_PT),
                        ),
                    );
                }
                DrawCmd::Image {
                    x,
                    y,
                    width,
                    height,
                } => {
                    // No XObject is registered without a logo.
                    if self.logo.is_none() {
                        continue;
                    }
                    let px = x * MM_TO_PT;
                    let py = (page.height - (y + height)) * MM_TO_PT;
                    push_str(
                        &mut ops,
                        &format!(
                            "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n",
                            format_coord(width * MM_TO_PT),
                            format_coord(height * MM_TO_PT),
                            format_coord(px),
                            format_coord(py),
                            LOGO_NAME,
                        ),
                    );
                }
            }
        }
        ops
    }
}

impl Default for PdfRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the artifact file name from an invoice number. Path-hostile
/// characters become underscores; an empty number falls back to
/// "invoice".
pub fn output_filename(number: &str) -> String {
    let cleaned: String = number
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "invoice.pdf".to_string()
    } else {
        format!("{}.pdf", cleaned)
    }
}

fn font_object(font: BuiltinFont) -> PdfObject {
    PdfObject::dict(vec![
        ("Type", PdfObject::name("Font")),
        ("Subtype", PdfObject::name("Type1")),
        ("BaseFont", PdfObject::name(font.pdf_base_name())),
        ("Encoding", PdfObject::name("WinAnsiEncoding")),
    ])
}

fn write_logo_objects<W: Write>(
    w: &mut PdfWriter<W>,
    logo: &Logo,
    image_id: ObjId,
    smask_id: Option<ObjId>,
) -> Result<(), InvoiceError> {
    let data = flate_compress(&logo.samples)?;
    let mut dict = vec![
        ("Type", PdfObject::name("XObject")),
        ("Subtype", PdfObject::name("Image")),
        ("Width", PdfObject::Integer(logo.width as i64)),
        ("Height", PdfObject::Integer(logo.height as i64)),
        ("ColorSpace", PdfObject::name(logo.color_space.pdf_name())),
        ("BitsPerComponent", PdfObject::Integer(8)),
        ("Filter", PdfObject::name("FlateDecode")),
    ];
    if let Some(id) = smask_id {
        dict.push(("SMask", PdfObject::reference(id)));
    }
    w.write_object(image_id, &PdfObject::stream(dict, data))?;

    if let (Some(id), Some(alpha)) = (smask_id, logo.alpha.as_ref()) {
        let data = flate_compress(alpha)?;
        let dict = vec![
            ("Type", PdfObject::name("XObject")),
            ("Subtype", PdfObject::name("Image")),
            ("Width", PdfObject::Integer(logo.width as i64)),
            ("Height", PdfObject::Integer(logo.height as i64)),
            ("ColorSpace", PdfObject::name("DeviceGray")),
            ("BitsPerComponent", PdfObject::Integer(8)),
            ("Filter", PdfObject::name("FlateDecode")),
        ];
        w.write_object(id, &PdfObject::stream(dict, data))?;
    }
    Ok(())
}

fn flate_compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn push_str(ops: &mut Vec<u8>, s: &str) {
    ops.extend_from_slice(s.as_bytes());
}

/// Format a coordinate for content-stream output: integers without a
/// decimal point, fractions trimmed to four places.
fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e12 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Color;
    use crate::fonts::BuiltinFont;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn renderer_defaults() {
        let r = PdfRenderer::new();
        assert!(r.logo.is_none());
        assert!(!r.compress);
        assert!(r.info.is_empty());
    }

    #[test]
    fn minimal_page_renders() {
        let mut page = Page::new(210.0, 297.0);
        page.push(DrawCmd::Text {
            x: 15.0,
            y: 50.0,
            content: "BILL TO:".to_string(),
            font: BuiltinFont::HelveticaBold,
            size: 11.0,
            color: Color::rgb8(0, 0, 0),
            align: TextAlign::Left,
        });
        let bytes = PdfRenderer::new().render_to_vec(&[page]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7\n"));
        assert!(contains(&bytes, b"/MediaBox [0 0 595.275591 841.889764]"));
        assert!(contains(&bytes, b"(BILL TO:) Tj"));
        assert!(contains(&bytes, b"%%EOF\n"));
    }

    #[test]
    fn compressed_content_hides_operators() {
        let mut page = Page::new(210.0, 297.0);
        page.push(DrawCmd::Text {
            x: 15.0,
            y: 50.0,
            content: "BILL TO:".to_string(),
            font: BuiltinFont::HelveticaBold,
            size: 11.0,
            color: Color::rgb8(0, 0, 0),
            align: TextAlign::Left,
        });
        let mut renderer = PdfRenderer::new();
        renderer.set_compression(true);
        let bytes = renderer.render_to_vec(&[page]).unwrap();
        assert!(!contains(&bytes, b"(BILL TO:) Tj"));
        assert!(contains(&bytes, b"/Filter /FlateDecode"));
    }

    #[test]
    fn info_entries_written() {
        let page = Page::new(210.0, 297.0);
        let mut renderer = PdfRenderer::new();
        renderer.set_info("Creator", "acme billing");
        let bytes = renderer.render_to_vec(&[page]).unwrap();
        assert!(contains(&bytes, b"/Creator (acme billing)"));
    }

    #[test]
    fn y_axis_is_flipped() {
        // A command near the top of the page in mm lands near 841pt.
        let mut page = Page::new(210.0, 297.0);
        page.push(DrawCmd::Line {
            x1: 15.0,
            y1: 0.0,
            x2: 195.0,
            y2: 0.0,
            stroke: crate::commands::Stroke {
                color: Color::rgb8(0, 0, 0),
                width: 0.2,
            },
        });
        let bytes = PdfRenderer::new().render_to_vec(&[page]).unwrap();
        assert!(contains(&bytes, b"841.8898 m"));
    }

    #[test]
    fn filename_passthrough() {
        assert_eq!(output_filename("INV-2024-001"), "INV-2024-001.pdf");
    }

    #[test]
    fn filename_sanitizes_separators() {
        assert_eq!(output_filename("INV/2024\\001"), "INV_2024_001.pdf");
        assert_eq!(output_filename("a:b*c?"), "a_b_c_.pdf");
    }

    #[test]
    fn filename_empty_falls_back() {
        assert_eq!(output_filename(""), "invoice.pdf");
        assert_eq!(output_filename("   "), "invoice.pdf");
    }

    #[test]
    fn coord_formatting() {
        assert_eq!(format_coord(15.0), "15");
        assert_eq!(format_coord(0.16), "0.16");
        assert_eq!(format_coord(42.519685), "42.5197");
    }
}
