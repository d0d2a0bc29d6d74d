//! # HTTP Blob Store
//!
//! Client for a Vercel-Blob-compatible REST API.
//!
//! ```text
//!   put:  PUT  {base}/{pathname}          authorization: Bearer <token>
//!                                         x-content-type: application/pdf
//!         ◄──  { url, downloadUrl, pathname }
//!
//!   list: GET  {base}?limit=1000[&cursor=…]
//!         ◄──  { blobs: [...], cursor, hasMore }   (repeat while hasMore)
//! ```
//!
//! Requests are single-shot with the client's default settings.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::blob::{check_pathname, BlobObject, BlobStore, PutBlobResult, PutOptions};
use crate::error::{StoreError, StoreResult};

/// Blob API version sent with every request.
pub const API_VERSION: &str = "7";

/// Page size requested when listing.
const LIST_LIMIT: &str = "1000";

#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutReply {
    url: String,
    download_url: String,
    pathname: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    blobs: Vec<BlobObject>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl HttpBlobStore {
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    pub fn with_client(client: reqwest::Client, mut base_url: Url, token: impl Into<String>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        HttpBlobStore {
            client,
            base_url,
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn list_url(&self, cursor: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", LIST_LIMIT);
            if let Some(cursor) = cursor {
                query.append_pair("cursor", cursor);
            }
        }
        url
    }
}

/// Returns the body of a 2xx response, or the service's error message.
async fn success_body(response: reqwest::Response) -> StoreResult<String> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorReply>(&body)
            .map(|reply| reply.error.message)
            .unwrap_or(body);
        return Err(StoreError::Http {
            status: status.as_u16(),
            message,
        });
    }
    Ok(body)
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, pathname: &str, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<PutBlobResult> {
        check_pathname(pathname)?;
        let url = self.base_url.join(pathname)?;
        let size = bytes.len() as u64;

        debug!(%url, size, "Uploading blob");
        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .header("x-api-version", API_VERSION)
            .header("x-content-type", &options.content_type)
            .header("x-add-random-suffix", "0")
            .body(bytes)
            .send()
            .await?;

        let reply: PutReply = serde_json::from_str(&success_body(response).await?)?;
        Ok(PutBlobResult {
            url: reply.url,
            download_url: reply.download_url,
            pathname: reply.pathname,
            size,
        })
    }

    async fn list(&self) -> StoreResult<Vec<BlobObject>> {
        let mut blobs = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let response = self
                .client
                .get(self.list_url(cursor.as_deref()))
                .bearer_auth(&self.token)
                .header("x-api-version", API_VERSION)
                .send()
                .await?;

            let page: ListPage = serde_json::from_str(&success_body(response).await?)?;
            debug!(count = page.blobs.len(), has_more = page.has_more, "Fetched blob list page");
            blobs.extend(page.blobs);

            match page.cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(blobs)
    }
}
