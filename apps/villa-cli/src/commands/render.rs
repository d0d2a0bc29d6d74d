//! `render` and `print`: turn an input file into a PDF.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use villa_core::InvoiceSession;
use villa_document::{
    export, print, DocumentRenderer, ExportOptions, ExportedDocument, ImageFileSurface, ProgrammaticRenderer,
    SystemViewer, VisualCaptureRenderer,
};
use villa_store::{InvoiceArchive, UploadResponse};

use crate::config::AppConfig;
use crate::input::InvoiceInput;

#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub upload: bool,
    pub bytes_only: bool,
    /// Captured raster of the invoice view; programmatic layout otherwise.
    pub capture: Option<PathBuf>,
}

/// What a render produced.
#[derive(Debug)]
pub struct RenderOutcome {
    pub session: InvoiceSession,
    pub document: ExportedDocument,
    pub upload: Option<UploadResponse>,
}

fn renderer_for(capture: Option<&Path>) -> Box<dyn DocumentRenderer> {
    match capture {
        Some(path) => Box::new(VisualCaptureRenderer::new(ImageFileSurface::new(path))),
        None => Box::new(ProgrammaticRenderer::new()),
    }
}

async fn load_session(config: &AppConfig, input: &Path) -> Result<InvoiceSession> {
    InvoiceInput::read(input)
        .await?
        .into_session(config.issuer.clone(), &config.invoice.prefix, Local::now().naive_local())
}

/// Builds, exports and optionally uploads one invoice.
///
/// The session is marked exported once the PDF exists. An upload failure
/// is reported in the outcome and does not undo the export.
pub async fn render(config: &AppConfig, args: &RenderArgs) -> Result<RenderOutcome> {
    let mut session = load_session(config, &args.input).await?;

    let options = if args.bytes_only {
        ExportOptions::bytes_only()
    } else {
        ExportOptions::download(args.out.clone().unwrap_or_else(|| config.export.download_dir.clone()))
    };

    let renderer = renderer_for(args.capture.as_deref());
    let document = export(renderer.as_ref(), session.record(), &options)
        .await
        .context("failed to render invoice")?;
    session.mark_exported();
    info!(
        invoice_no = %session.record().invoice_no(),
        pages = document.page_count,
        bytes = document.bytes.len(),
        "Invoice rendered"
    );

    let upload = if args.upload {
        let archive = InvoiceArchive::new(config.storage.open()?);
        Some(archive.save(session.record().invoice_no(), document.bytes.clone()).await)
    } else {
        None
    };

    Ok(RenderOutcome {
        session,
        document,
        upload,
    })
}

/// `villa render`: renders and reports on stdout.
pub async fn run(config: &AppConfig, args: &RenderArgs) -> Result<()> {
    let outcome = render(config, args).await?;
    let record = outcome.session.record();

    if args.bytes_only && !args.upload {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&outcome.document.bytes)?;
        stdout.flush()?;
        return Ok(());
    }

    println!("Invoice      {}", record.invoice_no());
    println!("Bill to      {}", record.customer().bill_to());
    println!("Grand total  {}", villa_core::words::format_grouped_currency(record.totals().grand_total));
    println!("Pages        {}", outcome.document.page_count);
    if let Some(path) = &outcome.document.path {
        println!("Saved to     {}", path.display());
    }

    match outcome.upload {
        Some(UploadResponse {
            success: true,
            url: Some(url),
            ..
        }) => println!("Uploaded     {}", url),
        Some(response) => {
            anyhow::bail!(
                "upload failed: {}",
                response.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        None => {}
    }

    Ok(())
}

/// `villa print`: renders with auto-print and opens the system viewer.
pub async fn print_invoice(config: &AppConfig, input: &Path, capture: Option<&Path>) -> Result<()> {
    let session = load_session(config, input).await?;
    let renderer = renderer_for(capture);

    print(renderer.as_ref(), session.record(), &SystemViewer::new())
        .await
        .context("failed to print invoice")?;
    println!("Opened {} for printing", session.record().invoice_no());
    Ok(())
}
