//! # Renderers
//!
//! Two ways to turn an invoice into a [`Document`]:
//!
//! ```text
//!                          ┌──────────────────────┐
//!                          │   DocumentRenderer   │  (async trait)
//!                          └──────────┬───────────┘
//!                ┌────────────────────┴────────────────────┐
//!   ┌────────────▼────────────┐             ┌──────────────▼──────────────┐
//!   │  ProgrammaticRenderer   │             │  VisualCaptureRenderer<S>   │
//!   │  InvoiceLayout ops      │             │  S: VisualSurface           │
//!   │  deterministic          │             │  raster tiled over pages    │
//!   └─────────────────────────┘             └─────────────────────────────┘
//! ```
//!
//! The visual path captures the invoice as it appears on screen at twice
//! its natural resolution, scales it to the A4 width and tiles it down as
//! many pages as its height needs.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};
use villa_core::invoice_number::document_filename;
use villa_core::InvoiceRecord;

use crate::document::{Document, DrawOp};
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Color, Rect, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::layout::InvoiceLayout;
use crate::pdf::PdfWriter;
use crate::raster::RasterImage;

/// Produces a paged document for an invoice.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, record: &InvoiceRecord) -> RenderResult<Document>;
}

// =============================================================================
// Programmatic
// =============================================================================

/// Renders from drawing operations; needs nothing but the record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgrammaticRenderer {
    layout: InvoiceLayout,
}

impl ProgrammaticRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous layout for callers without a runtime.
    pub fn layout(&self, record: &InvoiceRecord) -> Document {
        self.layout.layout(record)
    }

    /// Layout straight to PDF bytes.
    pub fn to_pdf_bytes(&self, record: &InvoiceRecord) -> RenderResult<Vec<u8>> {
        PdfWriter::write(&self.layout(record))
    }
}

#[async_trait]
impl DocumentRenderer for ProgrammaticRenderer {
    async fn render(&self, record: &InvoiceRecord) -> RenderResult<Document> {
        Ok(self.layout(record))
    }
}

// =============================================================================
// Visual Capture
// =============================================================================

/// Capture resolution multiplier.
pub const CAPTURE_SCALE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub scale: f32,
    /// Painted behind transparent pixels.
    pub background: Color,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        CaptureOptions {
            scale: CAPTURE_SCALE,
            background: Color::WHITE,
        }
    }
}

/// Something that can rasterise the on-screen invoice view.
#[async_trait]
pub trait VisualSurface: Send + Sync {
    /// Captures the current view. Fails with
    /// [`RenderError::SurfaceUnavailable`] when there is nothing to capture.
    async fn capture(&self, options: CaptureOptions) -> RenderResult<RasterImage>;
}

/// A view already rasterised to an image file (PNG or JPEG).
///
/// The file is read at capture time, so a view that was never saved (or has
/// since been removed) reports the surface as unavailable.
#[derive(Debug, Clone)]
pub struct ImageFileSurface {
    path: PathBuf,
}

impl ImageFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ImageFileSurface { path: path.into() }
    }
}

#[async_trait]
impl VisualSurface for ImageFileSurface {
    async fn capture(&self, options: CaptureOptions) -> RenderResult<RasterImage> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            RenderError::SurfaceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(path = %self.path.display(), scale = options.scale, "Captured invoice view from file");
        RasterImage::decode(&bytes, options.background)
    }
}

/// Renders by capturing a [`VisualSurface`] and tiling the raster.
#[derive(Debug, Clone)]
pub struct VisualCaptureRenderer<S> {
    surface: S,
    options: CaptureOptions,
}

impl<S: VisualSurface> VisualCaptureRenderer<S> {
    pub fn new(surface: S) -> Self {
        VisualCaptureRenderer {
            surface,
            options: CaptureOptions::default(),
        }
    }

    pub fn with_options(surface: S, options: CaptureOptions) -> Self {
        VisualCaptureRenderer { surface, options }
    }
}

#[async_trait]
impl<S: VisualSurface> DocumentRenderer for VisualCaptureRenderer<S> {
    async fn render(&self, record: &InvoiceRecord) -> RenderResult<Document> {
        let image = self.surface.capture(self.options).await.map_err(|e| {
            warn!(invoice_no = %record.invoice_no(), error = %e, "Invoice view capture failed");
            e
        })?;

        let title = document_filename(record.invoice_no()).trim_end_matches(".pdf").to_string();
        Ok(tile_raster(title, image))
    }
}

/// Places `image` at full page width and repeats it, shifted up one page
/// height each time, until its whole height has been shown.
///
/// ```text
///   image height 630mm ──► page 1: top at    0
///                          page 2: top at -297
///                          page 3: top at -594
/// ```
pub fn tile_raster(title: String, image: RasterImage) -> Document {
    let image_height = image.height() as f32 * PAGE_WIDTH_MM / image.width() as f32;

    let mut document = Document::new(title);
    let id = document.add_image(image);

    let mut place = |top: f32| {
        document.add_page().push(DrawOp::Image {
            rect: Rect::new(0.0, top, PAGE_WIDTH_MM, image_height),
            image: id,
        });
    };

    place(0.0);
    let mut height_left = image_height - PAGE_HEIGHT_MM;
    while height_left > 0.0 {
        place(height_left - image_height);
        height_left -= PAGE_HEIGHT_MM;
    }

    debug!(
        image_height_mm = image_height,
        pages = document.page_count(),
        "Raster tiled across pages"
    );
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record_with_items;
    use villa_core::State;

    /// In-memory surface; `None` behaves like an unmounted view.
    struct StaticSurface(Option<RasterImage>);

    #[async_trait]
    impl VisualSurface for StaticSurface {
        async fn capture(&self, options: CaptureOptions) -> RenderResult<RasterImage> {
            assert_eq!(options.scale, CAPTURE_SCALE);
            assert_eq!(options.background, Color::WHITE);
            self.0
                .clone()
                .ok_or_else(|| RenderError::SurfaceUnavailable("invoice view not mounted".into()))
        }
    }

    fn image_tops(doc: &Document) -> Vec<f32> {
        doc.pages()
            .iter()
            .flat_map(|p| p.ops())
            .filter_map(|op| match op {
                DrawOp::Image { rect, .. } => Some(rect.y),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_programmatic_render_matches_layout() {
        let record = record_with_items(3, Some(State::UttarPradesh));
        let renderer = ProgrammaticRenderer::new();
        let doc = renderer.render(&record).await.unwrap();
        assert_eq!(doc, renderer.layout(&record));
    }

    #[tokio::test]
    async fn test_visual_capture_single_page() {
        // 210 wide, 280 tall once scaled: fits one page.
        let surface = StaticSurface(Some(RasterImage::filled(300, 400, Color::WHITE).unwrap()));
        let renderer = VisualCaptureRenderer::new(surface);
        let doc = renderer.render(&record_with_items(1, None)).await.unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.images().len(), 1);
        assert_eq!(image_tops(&doc), vec![0.0]);
    }

    #[tokio::test]
    async fn test_visual_capture_tiles_tall_raster() {
        // 100x300 px scales to 210x630 mm.
        let surface = StaticSurface(Some(RasterImage::filled(100, 300, Color::BLUSH).unwrap()));
        let renderer = VisualCaptureRenderer::new(surface);
        let doc = renderer.render(&record_with_items(1, None)).await.unwrap();

        assert_eq!(doc.page_count(), 3);
        let tops = image_tops(&doc);
        assert_eq!(tops.len(), 3);
        assert!((tops[1] + 297.0).abs() < 1e-3);
        assert!((tops[2] + 594.0).abs() < 1e-3);
        // Every page shows the same image.
        assert_eq!(doc.images().len(), 1);
    }

    #[tokio::test]
    async fn test_visual_capture_exact_page_height() {
        // 210x297 exactly: no second page.
        let surface = StaticSurface(Some(RasterImage::filled(210, 297, Color::WHITE).unwrap()));
        let doc = VisualCaptureRenderer::new(surface)
            .render(&record_with_items(1, None))
            .await
            .unwrap();
        assert_eq!(doc.page_count(), 1);
    }

    #[tokio::test]
    async fn test_surface_unavailable_is_reported() {
        let renderer = VisualCaptureRenderer::new(StaticSurface(None));
        let err = renderer.render(&record_with_items(1, None)).await.unwrap_err();
        assert!(matches!(err, RenderError::SurfaceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_image_file_surface() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.png");
        let mut view = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
        view.put_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
        view.save(&path).unwrap();

        let options = CaptureOptions {
            background: Color::BLUSH,
            ..CaptureOptions::default()
        };
        let image = ImageFileSurface::new(&path).capture(options).await.unwrap();
        assert_eq!((image.width(), image.height()), (2, 2));
        assert_eq!(&image.rgb()[..3], &[252, 231, 243]);
        assert_eq!(&image.rgb()[9..], &[10, 20, 30]);

        let missing = ImageFileSurface::new(dir.path().join("missing.png"));
        let err = missing.capture(CaptureOptions::default()).await.unwrap_err();
        assert!(matches!(err, RenderError::SurfaceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_garbage_capture_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = ImageFileSurface::new(&path)
            .capture(CaptureOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Image(_)));
    }
}
