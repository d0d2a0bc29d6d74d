//! # Document Model
//!
//! A renderer-neutral description of the pages to print: an ordered list of
//! drawing operations per page, in millimetres, plus any raster images the
//! pages reference.
//!
//! ```text
//!   Document
//!   ├── pages:  [Page { ops: [Rect, Text, Line, Image(0), ...] }, ...]
//!   ├── images: [RasterImage, ...]          ◄── referenced by ImageId
//!   └── auto_print
//! ```
//!
//! The model is plain data, so tests can inspect exactly what a layout drew
//! without parsing PDF output.

use crate::geometry::{Color, Point, Rect};
use crate::raster::RasterImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A single line of text; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: Font,
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Stroke { width: f32, color: Color },
    Fill(Color),
}

/// Index of an image in [`Document::images`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextRun),
    Line { from: Point, to: Point, width: f32, color: Color },
    Rect { rect: Rect, paint: Paint },
    Circle { center: Point, radius: f32, width: f32, color: Color },
    /// Raster placed at `rect`; parts outside the page are clipped.
    Image { rect: Rect, image: ImageId },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    ops: Vec<DrawOp>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs in drawing order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Returns true if any text run on the page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().any(|run| run.text.contains(needle))
    }

    /// The first text run containing `needle`.
    pub fn find_text(&self, needle: &str) -> Option<&TextRun> {
        self.text_runs().find(|run| run.text.contains(needle))
    }
}

/// A finished, paged document ready for the PDF writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    title: String,
    pages: Vec<Page>,
    images: Vec<RasterImage>,
    auto_print: bool,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Document {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Appends an empty page and returns it.
    pub fn add_page(&mut self) -> &mut Page {
        self.pages.push(Page::new());
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Appends a page built elsewhere.
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn last_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.last_mut()
    }

    pub fn add_image(&mut self, image: RasterImage) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    pub fn images(&self) -> &[RasterImage] {
        &self.images
    }

    /// Ask the viewer to open the print dialog when the PDF is opened.
    pub fn set_auto_print(&mut self, auto_print: bool) {
        self.auto_print = auto_print;
    }

    pub fn auto_print(&self) -> bool {
        self.auto_print
    }
}
