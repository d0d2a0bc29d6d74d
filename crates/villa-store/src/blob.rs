//! # Blob Store Contract
//!
//! A flat namespace of immutable byte objects addressed by pathname, with
//! public URLs. Mirrors the Vercel Blob `put`/`list` API that the hosted
//! invoice archive uses.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// MIME type of archived invoices.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: String,
}

impl PutOptions {
    pub fn pdf() -> Self {
        PutOptions {
            content_type: PDF_CONTENT_TYPE.to_string(),
        }
    }
}

/// What the store reports after a successful `put`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutBlobResult {
    pub url: String,
    pub download_url: String,
    pub pathname: String,
    pub size: u64,
}

/// A stored object as returned by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    pub url: String,
    pub download_url: String,
    pub pathname: String,
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Checks that `pathname` is a single, visible path segment that is also
/// safe to append to a URL.
pub fn check_pathname(pathname: &str) -> StoreResult<()> {
    let bad = pathname.is_empty()
        || pathname.starts_with('.')
        || pathname.contains(['/', '\\', '\0', '?', '#']);
    if bad {
        return Err(StoreError::InvalidKey(pathname.to_string()));
    }
    Ok(())
}

/// Storage for exported invoice documents.
///
/// Calls are single-shot: implementations do not retry or time out.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `pathname`, replacing any existing object.
    async fn put(&self, pathname: &str, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<PutBlobResult>;

    /// Lists every stored object, in no particular order.
    async fn list(&self) -> StoreResult<Vec<BlobObject>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_object_wire_format() {
        let json = r#"{
            "url": "https://store.example/Invoice-1.pdf",
            "downloadUrl": "https://store.example/Invoice-1.pdf?download=1",
            "pathname": "Invoice-1.pdf",
            "size": 2048,
            "uploadedAt": "2026-10-17T08:30:00.000Z"
        }"#;

        let blob: BlobObject = serde_json::from_str(json).unwrap();
        assert_eq!(blob.pathname, "Invoice-1.pdf");
        assert_eq!(blob.size, 2048);
        assert_eq!(blob.uploaded_at.to_rfc3339(), "2026-10-17T08:30:00+00:00");

        let back = serde_json::to_value(&blob).unwrap();
        assert!(back.get("downloadUrl").is_some());
        assert!(back.get("uploadedAt").is_some());
    }

    #[test]
    fn test_check_pathname() {
        assert!(check_pathname("Invoice-VMP-17102026-0042.pdf").is_ok());
        for bad in ["", ".env", "../up.pdf", "dir/a.pdf", "a\\b.pdf", "a?b.pdf", "a#b.pdf"] {
            assert!(check_pathname(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_pdf_options() {
        assert_eq!(PutOptions::pdf().content_type, "application/pdf");
    }
}
