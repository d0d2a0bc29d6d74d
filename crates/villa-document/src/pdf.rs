//! # PDF Writer
//!
//! Serialises a [`Document`] with lopdf.
//!
//! ```text
//!   Catalog ──► Pages ──► Page × N ──► Contents (Flate)
//!      │                    │
//!      │                    └──► Resources ──► F1 Helvetica, F2 Helvetica-Bold
//!      │                                   └─► Im0.. RGB image XObjects
//!      └──► OpenAction (JavaScript print), only when auto-print is set
//! ```
//!
//! Output carries no creation date or file identifier, so the same
//! document always serialises to the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document as PdfDocument, Object, ObjectId, Stream};
use tracing::debug;

use crate::document::{Align, Document, DrawOp, Font, Page, Paint, TextRun};
use crate::error::RenderResult;
use crate::geometry::{mm_to_pt, Color, Point, Rect, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::metrics::{encode_win_ansi, text_width_mm};
use crate::raster::RasterImage;

const PRODUCER: &str = "villa-document";

/// Opens the viewer's print dialog.
const PRINT_SCRIPT: &str = "this.print({bUI: true, bSilent: false, bShrinkToFit: true});";

/// Bézier control distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

pub struct PdfWriter;

impl PdfWriter {
    /// Serialises `document` to PDF bytes.
    pub fn write(document: &Document) -> RenderResult<Vec<u8>> {
        let mut pdf = PdfDocument::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let resources_id = add_resources(&mut pdf, document.images());

        let mut kids = Vec::with_capacity(document.page_count());
        for page in document.pages() {
            let content = Content { operations: page_operations(page) };
            let content_id = pdf.add_object(Stream::new(Dictionary::new(), content.encode()?));

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", name("Page"));
            page_dict.set("Parent", Object::Reference(pages_id));
            page_dict.set(
                "MediaBox",
                Object::Array(vec![
                    real(0.0),
                    real(0.0),
                    real(mm_to_pt(PAGE_WIDTH_MM)),
                    real(mm_to_pt(PAGE_HEIGHT_MM)),
                ]),
            );
            page_dict.set("Contents", Object::Reference(content_id));
            page_dict.set("Resources", Object::Reference(resources_id));
            kids.push(Object::Reference(pdf.add_object(page_dict)));
        }

        let mut pages = Dictionary::new();
        pages.set("Type", name("Pages"));
        pages.set("Count", Object::Integer(kids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        pdf.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", name("Catalog"));
        catalog.set("Pages", Object::Reference(pages_id));
        if document.auto_print() {
            let mut action = Dictionary::new();
            action.set("Type", name("Action"));
            action.set("S", name("JavaScript"));
            action.set("JS", Object::string_literal(PRINT_SCRIPT));
            catalog.set("OpenAction", Object::Dictionary(action));
        }
        let catalog_id = pdf.add_object(catalog);

        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal(encode_win_ansi(document.title())));
        info.set("Producer", Object::string_literal(PRODUCER));
        let info_id = pdf.add_object(info);

        pdf.trailer.set("Root", Object::Reference(catalog_id));
        pdf.trailer.set("Info", Object::Reference(info_id));
        pdf.compress();

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes)?;

        debug!(
            title = %document.title(),
            pages = document.page_count(),
            images = document.images().len(),
            bytes = bytes.len(),
            "PDF written"
        );
        Ok(bytes)
    }
}

fn add_resources(pdf: &mut PdfDocument, images: &[RasterImage]) -> ObjectId {
    let mut fonts = Dictionary::new();
    fonts.set(font_resource(Font::Regular), Object::Reference(pdf.add_object(font_dict("Helvetica"))));
    fonts.set(font_resource(Font::Bold), Object::Reference(pdf.add_object(font_dict("Helvetica-Bold"))));

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    if !images.is_empty() {
        let mut xobjects = Dictionary::new();
        for (index, image) in images.iter().enumerate() {
            let id = pdf.add_object(image_stream(image));
            xobjects.set(image_resource(index), Object::Reference(id));
        }
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    pdf.add_object(resources)
}

fn font_dict(base_font: &str) -> Dictionary {
    let mut font = Dictionary::new();
    font.set("Type", name("Font"));
    font.set("Subtype", name("Type1"));
    font.set("BaseFont", name(base_font));
    font.set("Encoding", name("WinAnsiEncoding"));
    font
}

fn image_stream(image: &RasterImage) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", name("XObject"));
    dict.set("Subtype", name("Image"));
    dict.set("Width", Object::Integer(image.width() as i64));
    dict.set("Height", Object::Integer(image.height() as i64));
    dict.set("ColorSpace", name("DeviceRGB"));
    dict.set("BitsPerComponent", Object::Integer(8));
    Stream::new(dict, image.rgb().to_vec())
}

fn font_resource(font: Font) -> &'static str {
    match font {
        Font::Regular => "F1",
        Font::Bold => "F2",
    }
}

fn image_resource(index: usize) -> String {
    format!("Im{}", index)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

// =============================================================================
// Content Streams
// =============================================================================

/// Page x in millimetres to PDF user space.
fn px(x: f32) -> Object {
    real(mm_to_pt(x))
}

/// Page y (top-down, mm) to PDF user space (bottom-up, pt).
fn py(y: f32) -> Object {
    real(mm_to_pt(PAGE_HEIGHT_MM - y))
}

fn color_operands(color: Color) -> Vec<Object> {
    color.components().into_iter().map(real).collect()
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in page.ops() {
        match op {
            DrawOp::Text(run) => text_operations(&mut ops, run),
            DrawOp::Line { from, to, width, color } => {
                stroke_style(&mut ops, *width, *color);
                ops.push(Operation::new("m", vec![px(from.x), py(from.y)]));
                ops.push(Operation::new("l", vec![px(to.x), py(to.y)]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Rect { rect, paint } => {
                match paint {
                    Paint::Stroke { width, color } => stroke_style(&mut ops, *width, *color),
                    Paint::Fill(color) => ops.push(Operation::new("rg", color_operands(*color))),
                }
                ops.push(Operation::new("re", rect_operands(rect)));
                let paint_op = match paint {
                    Paint::Stroke { .. } => "S",
                    Paint::Fill(_) => "f",
                };
                ops.push(Operation::new(paint_op, vec![]));
            }
            DrawOp::Circle { center, radius, width, color } => {
                stroke_style(&mut ops, *width, *color);
                circle_path(&mut ops, *center, *radius);
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Image { rect, image } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        real(mm_to_pt(rect.width)),
                        real(0.0),
                        real(0.0),
                        real(mm_to_pt(rect.height)),
                        px(rect.x),
                        py(rect.bottom()),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Object::Name(image_resource(image.0).into_bytes())]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn stroke_style(ops: &mut Vec<Operation>, width: f32, color: Color) {
    ops.push(Operation::new("w", vec![real(mm_to_pt(width))]));
    ops.push(Operation::new("RG", color_operands(color)));
}

fn rect_operands(rect: &Rect) -> Vec<Object> {
    vec![
        px(rect.x),
        py(rect.bottom()),
        real(mm_to_pt(rect.width)),
        real(mm_to_pt(rect.height)),
    ]
}

fn text_operations(ops: &mut Vec<Operation>, run: &TextRun) {
    let width = text_width_mm(&run.text, run.font, run.size);
    let x = match run.align {
        Align::Left => run.x,
        Align::Center => run.x - width / 2.0,
        Align::Right => run.x - width,
    };

    ops.push(Operation::new("rg", color_operands(run.color)));
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![name(font_resource(run.font)), real(run.size)]));
    ops.push(Operation::new("Td", vec![px(x), py(run.y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(&run.text))]));
    ops.push(Operation::new("ET", vec![]));
}

/// Four Bézier quarter arcs, counter-clockwise from the rightmost point.
fn circle_path(ops: &mut Vec<Operation>, center: Point, radius: f32) {
    let k = radius * KAPPA;
    let (cx, cy, r) = (center.x, center.y, radius);
    let point = |x: f32, y: f32| [px(x), py(y)];

    ops.push(Operation::new("m", point(cx + r, cy).to_vec()));
    let arcs = [
        [(cx + r, cy - k), (cx + k, cy - r), (cx, cy - r)],
        [(cx - k, cy - r), (cx - r, cy - k), (cx - r, cy)],
        [(cx - r, cy + k), (cx - k, cy + r), (cx, cy + r)],
        [(cx + k, cy + r), (cx + r, cy + k), (cx + r, cy)],
    ];
    for arc in arcs {
        let operands = arc.iter().flat_map(|&(x, y)| point(x, y)).collect();
        ops.push(Operation::new("c", operands));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ImageId;
    use crate::layout::InvoiceLayout;
    use crate::test_support::record_with_items;
    use villa_core::State;

    fn sample_document() -> Document {
        InvoiceLayout::new().layout(&record_with_items(4, Some(State::UttarPradesh)))
    }

    #[test]
    fn test_write_produces_pdf() {
        let bytes = PdfWriter::write(&sample_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_write_is_deterministic() {
        let doc = sample_document();
        assert_eq!(PdfWriter::write(&doc).unwrap(), PdfWriter::write(&doc).unwrap());
    }

    #[test]
    fn test_round_trip_page_count_and_text() {
        let record = record_with_items(60, Some(State::Delhi));
        let doc = InvoiceLayout::new().layout(&record);
        let bytes = PdfWriter::write(&doc).unwrap();

        let parsed = PdfDocument::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), doc.page_count());

        let first = parsed.extract_text(&[1]).unwrap();
        assert!(first.contains("Tax Invoice"));
    }

    #[test]
    fn test_auto_print_adds_open_action() {
        let mut doc = sample_document();
        let plain = PdfWriter::write(&doc).unwrap();
        let parsed = PdfDocument::load_mem(&plain).unwrap();
        assert!(parsed.catalog().unwrap().get(b"OpenAction").is_err());

        doc.set_auto_print(true);
        let printing = PdfWriter::write(&doc).unwrap();
        let parsed = PdfDocument::load_mem(&printing).unwrap();
        assert!(parsed.catalog().unwrap().get(b"OpenAction").is_ok());
    }

    #[test]
    fn test_image_xobject() {
        let mut doc = Document::new("capture");
        let image = doc.add_image(RasterImage::filled(4, 2, Color::BLUSH).unwrap());
        doc.add_page().push(DrawOp::Image {
            rect: Rect::new(0.0, 0.0, PAGE_WIDTH_MM, 105.0),
            image,
        });
        assert_eq!(image, ImageId(0));

        let bytes = PdfWriter::write(&doc).unwrap();
        let parsed = PdfDocument::load_mem(&bytes).unwrap();
        let has_image = parsed.objects.values().any(|obj| match obj {
            Object::Stream(stream) => stream
                .dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|n| n == b"Image")
                .unwrap_or(false),
            _ => false,
        });
        assert!(has_image);
    }

    #[test]
    fn test_text_alignment_offsets() {
        let run = |align| TextRun {
            text: "Total".into(),
            x: 100.0,
            y: 50.0,
            font: Font::Bold,
            size: 10.0,
            color: Color::BLACK,
            align,
        };
        let x_of = |align| {
            let mut ops = Vec::new();
            text_operations(&mut ops, &run(align));
            let td = ops.iter().find(|op| op.operator == "Td").unwrap();
            td.operands[0].as_float().unwrap()
        };

        let width = mm_to_pt(text_width_mm("Total", Font::Bold, 10.0));
        assert!((x_of(Align::Left) - mm_to_pt(100.0)).abs() < 1e-3);
        assert!((x_of(Align::Right) - (mm_to_pt(100.0) - width)).abs() < 1e-3);
        assert!((x_of(Align::Center) - (mm_to_pt(100.0) - width / 2.0)).abs() < 1e-3);
    }
}
