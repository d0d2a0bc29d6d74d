//! # Invoice Archive
//!
//! Saves exported invoice PDFs into a [`BlobStore`] and lists them back.
//!
//! ```text
//!   save("VMP-17102026-0042", pdf)
//!        │
//!        ▼
//!   put("Invoice-VMP-17102026-0042.pdf", pdf, application/pdf)
//!        │
//!        ▼
//!   UploadResponse { success, url, downloadUrl, pathname, size }
//!
//!   list() ──► every blob ──► keep *.pdf ──► newest first ──► ListResponse
//! ```
//!
//! The `try_*` methods return typed errors. `save` and `list` fold failures
//! into the serialisable response shapes that callers show to the user.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use villa_core::invoice_number::document_filename;

use crate::blob::{BlobObject, BlobStore, PutBlobResult, PutOptions};
use crate::error::StoreResult;

/// Result of saving one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        UploadResponse {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

impl From<PutBlobResult> for UploadResponse {
    fn from(blob: PutBlobResult) -> Self {
        UploadResponse {
            success: true,
            url: Some(blob.url),
            download_url: Some(blob.download_url),
            pathname: Some(blob.pathname),
            size: Some(blob.size),
            error: None,
        }
    }
}

/// Result of listing saved invoices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoices: Option<Vec<BlobObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        ListResponse {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

/// Saved-invoice archive over any blob store.
pub struct InvoiceArchive {
    store: Box<dyn BlobStore>,
}

impl InvoiceArchive {
    pub fn new(store: Box<dyn BlobStore>) -> Self {
        InvoiceArchive { store }
    }

    /// Uploads `pdf` as `Invoice-<invoice_no>.pdf`.
    pub async fn try_save(&self, invoice_no: &str, pdf: Vec<u8>) -> StoreResult<PutBlobResult> {
        let pathname = document_filename(invoice_no);
        let result = self.store.put(&pathname, pdf, &PutOptions::pdf()).await?;
        info!(pathname = %result.pathname, size = result.size, url = %result.url, "Invoice saved");
        Ok(result)
    }

    pub async fn save(&self, invoice_no: &str, pdf: Vec<u8>) -> UploadResponse {
        match self.try_save(invoice_no, pdf).await {
            Ok(blob) => blob.into(),
            Err(e) => {
                warn!(invoice_no, error = %e, "Invoice upload failed");
                UploadResponse::failure(e.to_string())
            }
        }
    }

    /// Saved PDFs, newest first.
    pub async fn try_list(&self) -> StoreResult<Vec<BlobObject>> {
        let mut invoices: Vec<BlobObject> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|blob| blob.pathname.ends_with(".pdf"))
            .collect();
        invoices.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

        info!(count = invoices.len(), "Listed saved invoices");
        Ok(invoices)
    }

    pub async fn list(&self) -> ListResponse {
        match self.try_list().await {
            Ok(invoices) => ListResponse {
                success: true,
                count: Some(invoices.len()),
                invoices: Some(invoices),
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Listing invoices failed");
                ListResponse::failure(e.to_string())
            }
        }
    }
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Marker and timestamp layout of archive entries named by upload time,
/// e.g. `invoice-2026-10-17T14-30-05-123Z.pdf`.
const TIMESTAMP_MARKER: &str = "invoice-";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";
const TIMESTAMP_LEN: usize = 19;

/// Human-friendly name for a stored invoice.
///
/// Timestamp-named entries become `Invoice - 17 Oct 2026, 02:30 PM` (UTC).
/// Anything else is the last path segment with its first `.pdf` removed.
pub fn display_name(pathname: &str) -> String {
    let filename = pathname.rsplit('/').next().unwrap_or(pathname);

    if let Some(at) = upload_timestamp(filename) {
        return format!("Invoice - {}", at.format("%d %b %Y, %I:%M %p"));
    }
    filename.replacen(".pdf", "", 1)
}

fn upload_timestamp(filename: &str) -> Option<NaiveDateTime> {
    filename.match_indices(TIMESTAMP_MARKER).find_map(|(start, marker)| {
        let stamp = filename.get(start + marker.len()..start + marker.len() + TIMESTAMP_LEN)?;
        NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
    })
}

/// Byte count as `N B`, `x.x KB` or `x.x MB`.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    /// In-memory store that records puts and serves a fixed listing.
    #[derive(Default)]
    struct MemoryStore {
        puts: Arc<Mutex<Vec<(String, usize, String)>>>,
        listing: Vec<BlobObject>,
        fail: bool,
    }

    #[async_trait]
    impl BlobStore for MemoryStore {
        async fn put(&self, pathname: &str, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<PutBlobResult> {
            if self.fail {
                return Err(StoreError::Http {
                    status: 500,
                    message: "store offline".into(),
                });
            }
            self.puts
                .lock()
                .unwrap()
                .push((pathname.to_string(), bytes.len(), options.content_type.clone()));
            Ok(PutBlobResult {
                url: format!("mem://{pathname}"),
                download_url: format!("mem://{pathname}?download=1"),
                pathname: pathname.to_string(),
                size: bytes.len() as u64,
            })
        }

        async fn list(&self) -> StoreResult<Vec<BlobObject>> {
            if self.fail {
                return Err(StoreError::Request("connection refused".into()));
            }
            Ok(self.listing.clone())
        }
    }

    fn blob(pathname: &str, hour: u32) -> BlobObject {
        BlobObject {
            url: format!("mem://{pathname}"),
            download_url: format!("mem://{pathname}?download=1"),
            pathname: pathname.to_string(),
            size: 100,
            uploaded_at: Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_save_uses_invoice_filename() {
        let archive = InvoiceArchive::new(Box::new(MemoryStore::default()));
        let response = archive.save("VMP-17102026-0042", vec![0; 42]).await;

        assert!(response.success);
        assert_eq!(response.pathname.as_deref(), Some("Invoice-VMP-17102026-0042.pdf"));
        assert_eq!(response.size, Some(42));
        assert_eq!(response.error, None);
    }

    #[tokio::test]
    async fn test_save_sends_pdf_content_type() {
        let store = MemoryStore::default();
        let puts = Arc::clone(&store.puts);
        let archive = InvoiceArchive::new(Box::new(store));

        let result = archive.try_save("A/B 1", vec![1, 2, 3]).await.unwrap();
        assert_eq!(result.pathname, "Invoice-A-B-1.pdf");

        let puts = puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0], ("Invoice-A-B-1.pdf".to_string(), 3, "application/pdf".to_string()));
    }

    #[tokio::test]
    async fn test_failed_save_reports_error() {
        let archive = InvoiceArchive::new(Box::new(MemoryStore {
            fail: true,
            ..Default::default()
        }));
        let response = archive.save("VMP-1", vec![0]).await;

        assert!(!response.success);
        assert!(response.url.is_none());
        assert_eq!(response.error.as_deref(), Some("Blob service returned 500: store offline"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "success": false, "error": "Blob service returned 500: store offline" }));
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let archive = InvoiceArchive::new(Box::new(MemoryStore {
            listing: vec![
                blob("Invoice-old.pdf", 8),
                blob("notes.txt", 12),
                blob("Invoice-new.pdf", 11),
                blob("Invoice-mid.pdf", 9),
            ],
            ..Default::default()
        }));

        let response = archive.list().await;
        assert!(response.success);
        assert_eq!(response.count, Some(3));

        let names: Vec<_> = response
            .invoices
            .unwrap()
            .into_iter()
            .map(|b| b.pathname)
            .collect();
        assert_eq!(names, vec!["Invoice-new.pdf", "Invoice-mid.pdf", "Invoice-old.pdf"]);
    }

    #[tokio::test]
    async fn test_failed_list_reports_error() {
        let archive = InvoiceArchive::new(Box::new(MemoryStore {
            fail: true,
            ..Default::default()
        }));
        let response = archive.list().await;

        assert!(!response.success);
        assert!(response.invoices.is_none());
        assert_eq!(response.error.as_deref(), Some("Request failed: connection refused"));
    }

    #[tokio::test]
    async fn test_list_response_wire_format() {
        let archive = InvoiceArchive::new(Box::new(MemoryStore {
            listing: vec![blob("Invoice-1.pdf", 10)],
            ..Default::default()
        }));
        let json = serde_json::to_value(archive.list().await).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 1);
        assert_eq!(json["invoices"][0]["downloadUrl"], "mem://Invoice-1.pdf?download=1");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Invoice-VMP-17102026-0042.pdf"), "Invoice-VMP-17102026-0042");
        assert_eq!(display_name("archive/2026/Invoice-VMP-1.pdf"), "Invoice-VMP-1");
        assert_eq!(
            display_name("invoice-2026-10-17T14-30-05-123Z.pdf"),
            "Invoice - 17 Oct 2026, 02:30 PM"
        );
        assert_eq!(display_name("invoice-garbage.pdf"), "invoice-garbage");
        assert_eq!(display_name("a.pdf.pdf"), "a.pdf");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
