//! Directory-backed [`BlobStore`].
//!
//! Every blob is one file directly under the root directory. URLs are
//! `file://` URLs unless a public base URL is configured, for setups where
//! the directory is served by a web server.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use url::Url;

use crate::blob::{check_pathname, BlobObject, BlobStore, PutBlobResult, PutOptions};
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: Option<Url>,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalBlobStore {
            root: root.into(),
            public_base_url: None,
        }
    }

    /// Serve URLs as `<base>/<pathname>` instead of `file://` paths.
    pub fn with_public_base_url(mut self, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        self.public_base_url = Some(base);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn urls_for(&self, pathname: &str) -> StoreResult<(String, String)> {
        let url = match &self.public_base_url {
            Some(base) => base.join(pathname)?,
            None => {
                let absolute = tokio::fs::canonicalize(self.root.join(pathname)).await?;
                Url::from_file_path(&absolute)
                    .map_err(|_| StoreError::InvalidKey(absolute.display().to_string()))?
            }
        };

        let mut download = url.clone();
        download.query_pairs_mut().append_pair("download", "1");
        Ok((url.to_string(), download.to_string()))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, pathname: &str, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<PutBlobResult> {
        check_pathname(pathname)?;

        tokio::fs::create_dir_all(&self.root).await?;
        let size = bytes.len() as u64;
        tokio::fs::write(self.root.join(pathname), bytes).await?;

        let (url, download_url) = self.urls_for(pathname).await?;
        info!(pathname, size, content_type = %options.content_type, "Blob stored locally");

        Ok(PutBlobResult {
            url,
            download_url,
            pathname: pathname.to_string(),
            size,
        })
    }

    async fn list(&self) -> StoreResult<Vec<BlobObject>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "Blob directory does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut blobs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let Some(pathname) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if check_pathname(&pathname).is_err() {
                continue;
            }

            let (url, download_url) = self.urls_for(&pathname).await?;
            blobs.push(BlobObject {
                url,
                download_url,
                pathname,
                size: metadata.len(),
                uploaded_at: DateTime::<Utc>::from(metadata.modified()?),
            });
        }

        debug!(root = %self.root.display(), count = blobs.len(), "Listed local blobs");
        Ok(blobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("invoices"));

        let result = store
            .put("Invoice-VMP-1.pdf", b"%PDF-1.5 test".to_vec(), &PutOptions::pdf())
            .await
            .unwrap();
        assert_eq!(result.pathname, "Invoice-VMP-1.pdf");
        assert_eq!(result.size, 13);
        assert!(result.url.starts_with("file://"));
        assert!(result.download_url.ends_with("?download=1"));

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].pathname, "Invoice-VMP-1.pdf");
        assert_eq!(listed[0].size, 13);
        assert_eq!(listed[0].url, result.url);
    }

    #[tokio::test]
    async fn test_put_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        store.put("a.pdf", vec![1; 10], &PutOptions::pdf()).await.unwrap();
        store.put("a.pdf", vec![2; 4], &PutOptions::pdf()).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].size, 4);
    }

    #[tokio::test]
    async fn test_rejects_escaping_pathnames() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        for bad in ["", "../x.pdf", "a/b.pdf", ".hidden.pdf", "a\\b.pdf"] {
            let err = store.put(bad, vec![0], &PutOptions::pdf()).await.unwrap_err();
            assert!(matches!(err, StoreError::InvalidKey(_)), "{bad}");
        }
    }

    #[tokio::test]
    async fn test_missing_root_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let base = Url::parse("https://invoices.example.in/archive").unwrap();
        let store = LocalBlobStore::new(dir.path()).with_public_base_url(base);

        let result = store.put("Invoice-7.pdf", vec![0; 3], &PutOptions::pdf()).await.unwrap();
        assert_eq!(result.url, "https://invoices.example.in/archive/Invoice-7.pdf");
        assert_eq!(
            result.download_url,
            "https://invoices.example.in/archive/Invoice-7.pdf?download=1"
        );
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("Invoice-1.pdf"), b"x").unwrap();

        let store = LocalBlobStore::new(dir.path());
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }
}
