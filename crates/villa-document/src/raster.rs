//! # Raster Images
//!
//! Captured pixels of the on-screen invoice, stored as packed 8-bit RGB.
//! Captures arrive either in memory or as encoded image files (PNG, JPEG),
//! decoded with the `image` crate.

use image::{imageops, DynamicImage, Rgba, RgbaImage};

use crate::error::{RenderError, RenderResult};
use crate::geometry::Color;

/// Packed RGB pixels, row-major, top row first.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgb.len())
            .finish()
    }
}

impl RasterImage {
    /// Wraps packed RGB pixels after checking the buffer matches the size.
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidRaster {
                reason: format!("empty image {}x{}", width, height),
            });
        }

        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(RenderError::InvalidRaster {
                reason: format!("expected {} bytes for {}x{}, got {}", expected, width, height, rgb.len()),
            });
        }

        Ok(RasterImage { width, height, rgb })
    }

    /// A single-colour image.
    pub fn filled(width: u32, height: u32, color: Color) -> RenderResult<Self> {
        let pixel = [color.r, color.g, color.b];
        let rgb = pixel.repeat(width as usize * height as usize);
        Self::new(width, height, rgb)
    }

    /// Decodes an encoded capture, guessing the format from its contents.
    ///
    /// Transparent pixels are painted over `background`.
    pub fn decode(bytes: &[u8], background: Color) -> RenderResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_dynamic(decoded, background)
    }

    /// Converts a decoded image, flattening any alpha onto `background`.
    pub fn from_dynamic(image: DynamicImage, background: Color) -> RenderResult<Self> {
        let rgb = if image.color().has_alpha() {
            let top = image.to_rgba8();
            let mut canvas = RgbaImage::from_pixel(
                top.width(),
                top.height(),
                Rgba([background.r, background.g, background.b, 255]),
            );
            imageops::overlay(&mut canvas, &top, 0, 0);
            DynamicImage::ImageRgba8(canvas).to_rgb8()
        } else {
            image.to_rgb8()
        };

        let (width, height) = rgb.dimensions();
        Self::new(width, height, rgb.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_new_checks_buffer() {
        assert!(RasterImage::new(2, 2, vec![0; 12]).is_ok());
        assert!(matches!(
            RasterImage::new(2, 2, vec![0; 11]),
            Err(RenderError::InvalidRaster { .. })
        ));
        assert!(RasterImage::new(0, 5, vec![]).is_err());
    }

    #[test]
    fn test_transparent_png_flattened_on_white() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        rgba.put_pixel(2, 0, Rgba([200, 100, 50, 255]));
        let png = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

        let img = RasterImage::decode(&png, Color::WHITE).unwrap();
        assert_eq!((img.width(), img.height()), (3, 1));
        assert_eq!(img.rgb(), &[255, 255, 255, 0, 0, 0, 200, 100, 50]);
    }

    #[test]
    fn test_opaque_png_kept_as_is() {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        let png = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Png);

        let img = RasterImage::decode(&png, Color::BLUSH).unwrap();
        assert_eq!(img.rgb(), &[255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_jpeg_decodes_to_size() {
        let rgb = RgbImage::from_pixel(16, 8, image::Rgb([255, 255, 255]));
        let jpeg = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Jpeg);

        let img = RasterImage::decode(&jpeg, Color::WHITE).unwrap();
        assert_eq!((img.width(), img.height()), (16, 8));
        assert_eq!(img.rgb().len(), 16 * 8 * 3);
    }

    #[test]
    fn test_undecodable_bytes_rejected() {
        let err = RasterImage::decode(b"not an image", Color::WHITE).unwrap_err();
        assert!(matches!(err, RenderError::Image(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(2, 1, Color::BLUSH).unwrap();
        assert_eq!(img.rgb(), &[252, 231, 243, 252, 231, 243]);
    }
}
