//! `list`: saved invoices, newest first.

use anyhow::{bail, Result};

use villa_store::{display_name, format_file_size, BlobObject, InvoiceArchive, ListResponse};

use crate::config::AppConfig;

pub async fn fetch(config: &AppConfig) -> Result<ListResponse> {
    let archive = InvoiceArchive::new(config.storage.open()?);
    Ok(archive.list().await)
}

/// One line per invoice: name, size, upload time and URL.
pub fn format_rows(invoices: &[BlobObject]) -> Vec<String> {
    invoices
        .iter()
        .map(|blob| {
            format!(
                "{:<40} {:>9}  {}  {}",
                display_name(&blob.pathname),
                format_file_size(blob.size),
                blob.uploaded_at.format("%Y-%m-%d %H:%M UTC"),
                blob.url
            )
        })
        .collect()
}

pub async fn run(config: &AppConfig, json: bool) -> Result<()> {
    let response = fetch(config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if !response.success {
        bail!(
            "failed to list invoices: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    let invoices = response.invoices.unwrap_or_default();
    if invoices.is_empty() {
        println!("No saved invoices");
        return Ok(());
    }

    for row in format_rows(&invoices) {
        println!("{}", row);
    }
    println!("{} invoice(s)", invoices.len());
    Ok(())
}
