//! # villa-document: Invoice Documents
//!
//! Lays out an [`InvoiceRecord`](villa_core::InvoiceRecord) on A4 pages and
//! writes the result as PDF, for download or printing.
//!
//! ## Pipeline
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────┐   ┌───────────┐
//! │ InvoiceRecord│──►│ DocumentRenderer   │──►│ Document │──►│ PdfWriter │──► bytes
//! └──────────────┘   │  • Programmatic    │   │  pages   │   │  (lopdf)  │
//!                    │  • VisualCapture   │   │  images  │   └───────────┘
//!                    └────────────────────┘   └──────────┘         │
//!                                                        ┌─────────┴─────────┐
//!                                                        ▼                   ▼
//!                                                 export (file/bytes)   print (viewer)
//! ```
//!
//! ## Modules
//!
//! - [`layout`] - Element placement and pagination
//! - [`renderer`] - Programmatic and visual-capture renderers
//! - [`pdf`] - PDF serialisation
//! - [`export`] - Download, bytes-only export and printing
//! - [`document`] - Renderer-neutral page model
//! - [`metrics`] - Standard font widths and text wrapping
//! - [`raster`] - Captured RGB images
//! - [`geometry`] - Page units and colours

pub mod document;
pub mod emblem;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod raster;
pub mod renderer;

#[cfg(test)]
mod test_support;

pub use document::{Document, Page};
pub use error::{RenderError, RenderResult};
pub use export::{export, print, DocumentViewer, ExportDestination, ExportOptions, ExportedDocument, SystemViewer};
pub use layout::InvoiceLayout;
pub use pdf::PdfWriter;
pub use raster::RasterImage;
pub use renderer::{
    CaptureOptions, DocumentRenderer, ImageFileSurface, ProgrammaticRenderer, VisualCaptureRenderer, VisualSurface,
};
