//! # Export and Print
//!
//! The two things a user does with a finished invoice: save it as a PDF,
//! or send it to the printer.
//!
//! ```text
//!   export: render ──► PDF bytes ──┬──► Download: write <dir>/Invoice-<no>.pdf
//!                                  └──► BytesOnly: hand bytes to the caller
//!
//!   print:  render ──► auto-print PDF ──► DocumentViewer::open
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;
use villa_core::invoice_number::document_filename;
use villa_core::InvoiceRecord;

use crate::error::{RenderError, RenderResult};
use crate::pdf::PdfWriter;
use crate::renderer::DocumentRenderer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    /// Write the file into this directory.
    Download { dir: PathBuf },
    /// Return the bytes only, e.g. for upload.
    BytesOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub destination: ExportDestination,
    /// Overrides the `Invoice-<no>.pdf` file name.
    pub filename: Option<String>,
}

impl ExportOptions {
    pub fn download(dir: impl Into<PathBuf>) -> Self {
        ExportOptions {
            destination: ExportDestination::Download { dir: dir.into() },
            filename: None,
        }
    }

    pub fn bytes_only() -> Self {
        ExportOptions {
            destination: ExportDestination::BytesOnly,
            filename: None,
        }
    }
}

/// Result of an export.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Where the file was written, for downloads.
    pub path: Option<PathBuf>,
    pub page_count: usize,
}

/// Renders `record` to PDF and delivers it per `options`.
pub async fn export(
    renderer: &dyn DocumentRenderer,
    record: &InvoiceRecord,
    options: &ExportOptions,
) -> RenderResult<ExportedDocument> {
    let document = renderer.render(record).await?;
    let bytes = PdfWriter::write(&document)?;
    let filename = options
        .filename
        .clone()
        .unwrap_or_else(|| document_filename(record.invoice_no()));

    let path = match &options.destination {
        ExportDestination::Download { dir } => {
            tokio::fs::create_dir_all(dir).await?;
            let path = dir.join(&filename);
            tokio::fs::write(&path, &bytes).await?;
            info!(path = %path.display(), bytes = bytes.len(), "Invoice PDF saved");
            Some(path)
        }
        ExportDestination::BytesOnly => None,
    };

    Ok(ExportedDocument {
        filename,
        bytes,
        path,
        page_count: document.page_count(),
    })
}

// =============================================================================
// Printing
// =============================================================================

/// Shows a PDF to the user, typically in a new viewer window.
#[async_trait]
pub trait DocumentViewer: Send + Sync {
    async fn open(&self, filename: &str, pdf: &[u8]) -> RenderResult<()>;
}

/// Renders `record` with auto-print enabled and opens it in `viewer`.
///
/// The viewer's print dialog appears as soon as the document loads.
pub async fn print(
    renderer: &dyn DocumentRenderer,
    record: &InvoiceRecord,
    viewer: &dyn DocumentViewer,
) -> RenderResult<()> {
    let mut document = renderer.render(record).await?;
    document.set_auto_print(true);
    let bytes = PdfWriter::write(&document)?;

    viewer.open(&document_filename(record.invoice_no()), &bytes).await?;
    info!(invoice_no = %record.invoice_no(), "Invoice sent to viewer for printing");
    Ok(())
}

/// Opens PDFs with the operating system's default handler.
///
/// The file is spooled to a directory first, since openers take a path.
#[derive(Debug, Clone)]
pub struct SystemViewer {
    spool_dir: PathBuf,
}

impl SystemViewer {
    pub fn new() -> Self {
        Self::with_spool_dir(std::env::temp_dir().join("villa-invoice"))
    }

    pub fn with_spool_dir(spool_dir: impl Into<PathBuf>) -> Self {
        SystemViewer { spool_dir: spool_dir.into() }
    }
}

impl Default for SystemViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentViewer for SystemViewer {
    async fn open(&self, filename: &str, pdf: &[u8]) -> RenderResult<()> {
        tokio::fs::create_dir_all(&self.spool_dir).await?;
        let path = self.spool_dir.join(filename);
        tokio::fs::write(&path, pdf).await?;

        let status = opener_command(&path)
            .status()
            .await
            .map_err(|e| RenderError::Viewer(format!("failed to launch viewer: {}", e)))?;
        if !status.success() {
            return Err(RenderError::Viewer(format!("viewer exited with {}", status)));
        }
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command(path: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(path: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(path: &Path) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::renderer::ProgrammaticRenderer;
    use crate::test_support::record_with_items;
    use std::sync::Mutex;
    use villa_core::State;

    #[derive(Default)]
    struct RecordingViewer {
        opened: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl DocumentViewer for RecordingViewer {
        async fn open(&self, filename: &str, pdf: &[u8]) -> RenderResult<()> {
            self.opened.lock().unwrap().push((filename.to_string(), pdf.to_vec()));
            Ok(())
        }
    }

    struct FailingRenderer;

    #[async_trait]
    impl DocumentRenderer for FailingRenderer {
        async fn render(&self, _record: &InvoiceRecord) -> RenderResult<Document> {
            Err(RenderError::SurfaceUnavailable("no view".into()))
        }
    }

    #[tokio::test]
    async fn test_export_bytes_only() {
        let record = record_with_items(2, Some(State::UttarPradesh));
        let out = export(&ProgrammaticRenderer::new(), &record, &ExportOptions::bytes_only())
            .await
            .unwrap();

        assert_eq!(out.filename, "Invoice-VMP-17102026-0042.pdf");
        assert!(out.bytes.starts_with(b"%PDF"));
        assert!(out.path.is_none());
        assert_eq!(out.page_count, 1);
    }

    #[tokio::test]
    async fn test_export_download_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("invoices");
        let record = record_with_items(2, Some(State::Delhi));

        let out = export(&ProgrammaticRenderer::new(), &record, &ExportOptions::download(&target))
            .await
            .unwrap();

        let path = out.path.clone().unwrap();
        assert_eq!(path, target.join("Invoice-VMP-17102026-0042.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), out.bytes);
    }

    #[tokio::test]
    async fn test_export_filename_override() {
        let record = record_with_items(1, None);
        let options = ExportOptions {
            filename: Some("copy.pdf".into()),
            ..ExportOptions::bytes_only()
        };
        let out = export(&ProgrammaticRenderer::new(), &record, &options).await.unwrap();
        assert_eq!(out.filename, "copy.pdf");
    }

    #[tokio::test]
    async fn test_failed_render_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let record = record_with_items(1, None);

        let err = export(&FailingRenderer, &record, &ExportOptions::download(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::SurfaceUnavailable(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_print_opens_auto_print_pdf() {
        let record = record_with_items(2, Some(State::UttarPradesh));
        let viewer = RecordingViewer::default();

        print(&ProgrammaticRenderer::new(), &record, &viewer).await.unwrap();

        let opened = viewer.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        let (filename, bytes) = &opened[0];
        assert_eq!(filename, "Invoice-VMP-17102026-0042.pdf");

        let parsed = lopdf::Document::load_mem(bytes).unwrap();
        assert!(parsed.catalog().unwrap().get(b"OpenAction").is_ok());
    }

    #[tokio::test]
    async fn test_print_propagates_render_failure() {
        let record = record_with_items(1, None);
        let viewer = RecordingViewer::default();

        assert!(print(&FailingRenderer, &record, &viewer).await.is_err());
        assert!(viewer.opened.lock().unwrap().is_empty());
    }
}
