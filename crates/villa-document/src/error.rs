//! # Document Errors
//!
//! Failures while laying out, capturing, writing or handing off a document.

use thiserror::Error;

/// Errors from rendering and exporting invoice documents.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The on-screen invoice view could not be captured.
    #[error("Visual surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A captured raster does not describe a usable image.
    #[error("Invalid raster image: {reason}")]
    InvalidRaster { reason: String },

    /// A captured image file could not be decoded.
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// The PDF object model rejected an operation.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Writing the exported file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The system viewer could not be launched.
    #[error("Viewer error: {0}")]
    Viewer(String),
}

impl RenderError {
    /// Returns true when a fresh attempt may succeed.
    ///
    /// A surface that was torn down mid-capture can come back, and file or
    /// viewer errors are often transient. Bad or undecodable
    /// images repeat, as do PDF errors.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RenderError::SurfaceUnavailable(_) | RenderError::Io(_) | RenderError::Viewer(_)
        )
    }
}

/// Result alias for document operations.
pub type RenderResult<T> = Result<T, RenderError>;
