//! # Page Geometry
//!
//! All layout happens in millimetres with the origin at the top-left corner
//! of an A4 page and y growing downwards. Only the PDF writer converts to
//! points with a bottom-left origin.
//!
//! ```text
//!   (0,0) ──────────────────────────► x (mm)
//!     │  ┌─────────── 210 ──────────┐
//!     │  │ 10 ┌──────────────────┐  │
//!     │  │    │   frame 190×277  │  │ 297
//!     ▼  │    └──────────────────┘  │
//!     y  └──────────────────────────┘
//! ```

/// A4 width.
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// A4 height.
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Margin on every side; the frame is drawn on it.
pub const MARGIN_MM: f32 = 10.0;

/// Width inside the frame.
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

/// Height inside the frame.
pub const CONTENT_HEIGHT_MM: f32 = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;

/// PDF points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Point size to millimetres.
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Header band and table header fill.
    pub const PANEL_GRAY: Color = Color::rgb(240, 240, 240);

    /// Brand colour for the title and emblem.
    pub const BRAND_PINK: Color = Color::rgb(233, 30, 140);

    /// Light brand tint behind the title and totals.
    pub const BLUSH: Color = Color::rgb(252, 231, 243);

    /// Placeholder text.
    pub const MUTED: Color = Color::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Components in `0.0..=1.0` as PDF colour operators expect.
    pub fn components(&self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        assert!((mm_to_pt(PAGE_WIDTH_MM) - 595.28).abs() < 0.01);
        assert!((mm_to_pt(PAGE_HEIGHT_MM) - 841.89).abs() < 0.01);
        assert!((pt_to_mm(mm_to_pt(42.0)) - 42.0).abs() < 1e-4);
    }

    #[test]
    fn test_frame_dimensions() {
        assert_eq!(CONTENT_WIDTH_MM, 190.0);
        assert_eq!(CONTENT_HEIGHT_MM, 277.0);
    }

    #[test]
    fn test_color_components() {
        assert_eq!(Color::WHITE.components(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.components(), [0.0, 0.0, 0.0]);
        let [r, _, _] = Color::BRAND_PINK.components();
        assert!((r - 233.0 / 255.0).abs() < 1e-6);
    }
}
