//! # Storage Configuration
//!
//! Selects and configures where exported invoices are archived.
//!
//! ## Example (TOML)
//! ```toml
//! [storage]
//! backend = "http"
//! base_url = "https://blob.vercel-storage.com"
//!
//! # or, for a plain directory:
//! # backend = "local"
//! # local_dir = "/srv/invoices"
//! # public_base_url = "https://invoices.example.in/"
//! ```
//!
//! The access token is never read from or written to the file; it comes
//! from `VILLA_BLOB_TOKEN`, falling back to `BLOB_READ_WRITE_TOKEN`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{StoreError, StoreResult};
use crate::http::HttpBlobStore;
use crate::local::LocalBlobStore;
use crate::BlobStore;

/// Which [`BlobStore`] implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Files in a local directory.
    #[default]
    Local,

    /// Vercel-Blob-compatible HTTP service.
    Http,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Http => write!(f, "http"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dir" | "fs" => Ok(StorageBackend::Local),
            "http" | "https" | "blob" | "vercel" => Ok(StorageBackend::Http),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown storage backend: '{}'. Valid options: local, http",
                other
            ))),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory used by the local backend.
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,

    /// Blob API endpoint for the http backend.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Public URL prefix for locally stored files; `file://` URLs otherwise.
    #[serde(default)]
    pub public_base_url: Option<String>,

    /// Bearer token for the http backend. Environment only.
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_local_dir() -> PathBuf {
    directories::ProjectDirs::from("in", "vmpvilla", "villa-invoice")
        .map(|dirs| dirs.data_dir().join("invoices"))
        .unwrap_or_else(|| PathBuf::from("invoices"))
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StorageBackend::default(),
            local_dir: default_local_dir(),
            base_url: None,
            public_base_url: None,
            token: None,
        }
    }
}

impl StoreConfig {
    /// Applies `VILLA_*` storage overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Recognised keys: `VILLA_STORAGE_BACKEND`, `VILLA_STORAGE_DIR`,
    /// `VILLA_BLOB_BASE_URL`, `VILLA_BLOB_TOKEN` and `BLOB_READ_WRITE_TOKEN`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("VILLA_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding storage backend from environment");
                    self.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown storage backend in environment"),
            }
        }

        if let Some(dir) = lookup("VILLA_STORAGE_DIR") {
            self.local_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("VILLA_BLOB_BASE_URL") {
            debug!(url = %url, "Overriding blob base URL from environment");
            self.base_url = Some(url);
        }

        if let Some(token) = lookup("VILLA_BLOB_TOKEN").or_else(|| lookup("BLOB_READ_WRITE_TOKEN")) {
            self.token = Some(token);
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(ref url) = self.base_url {
            check_http_url("base_url", url)?;
        }
        if let Some(ref url) = self.public_base_url {
            check_http_url("public_base_url", url)?;
        }

        match self.backend {
            StorageBackend::Http if self.base_url.is_none() => Err(StoreError::InvalidConfig(
                "http backend requires base_url".into(),
            )),
            StorageBackend::Local if self.local_dir.as_os_str().is_empty() => Err(StoreError::InvalidConfig(
                "local backend requires local_dir".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Builds the configured store.
    pub fn open(&self) -> StoreResult<Box<dyn BlobStore>> {
        self.validate()?;

        match self.backend {
            StorageBackend::Local => {
                let mut store = LocalBlobStore::new(&self.local_dir);
                if let Some(ref url) = self.public_base_url {
                    store = store.with_public_base_url(Url::parse(url)?);
                }
                Ok(Box::new(store))
            }
            StorageBackend::Http => {
                let base = self
                    .base_url
                    .as_deref()
                    .ok_or_else(|| StoreError::InvalidConfig("http backend requires base_url".into()))?;
                let token = self.token.clone().ok_or_else(|| {
                    StoreError::InvalidConfig("http backend requires VILLA_BLOB_TOKEN or BLOB_READ_WRITE_TOKEN".into())
                })?;
                Ok(Box::new(HttpBlobStore::new(Url::parse(base)?, token)))
            }
        }
    }
}

fn check_http_url(field: &str, raw: &str) -> StoreResult<()> {
    let url = Url::parse(raw)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(StoreError::InvalidConfig(format!(
            "{} must start with http:// or https://, got: {}",
            field, raw
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("local".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
        assert_eq!("HTTP".parse::<StorageBackend>().unwrap(), StorageBackend::Http);
        assert_eq!("vercel".parse::<StorageBackend>().unwrap(), StorageBackend::Http);
        assert!("s3".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StorageBackend::Local);
        assert!(config.local_dir.ends_with("invoices"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig {
            backend: StorageBackend::Http,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.base_url = Some("ftp://blob.example.com".into());
        assert!(config.validate().unwrap_err().is_config_error());

        config.base_url = Some("https://blob.vercel-storage.com".into());
        assert!(config.validate().is_ok());

        config.public_base_url = Some("not a url".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = StoreConfig::default();
        config.apply_overrides_from(lookup(&[
            ("VILLA_STORAGE_BACKEND", "http"),
            ("VILLA_BLOB_BASE_URL", "https://blob.example.com"),
            ("BLOB_READ_WRITE_TOKEN", "fallback-token"),
        ]));

        assert_eq!(config.backend, StorageBackend::Http);
        assert_eq!(config.base_url.as_deref(), Some("https://blob.example.com"));
        assert_eq!(config.token.as_deref(), Some("fallback-token"));

        config.apply_overrides_from(lookup(&[
            ("VILLA_BLOB_TOKEN", "primary-token"),
            ("BLOB_READ_WRITE_TOKEN", "fallback-token"),
            ("VILLA_STORAGE_BACKEND", "carrier-pigeon"),
        ]));
        assert_eq!(config.token.as_deref(), Some("primary-token"));
        assert_eq!(config.backend, StorageBackend::Http);
    }

    #[test]
    fn test_open_http_requires_token() {
        let config = StoreConfig {
            backend: StorageBackend::Http,
            base_url: Some("https://blob.example.com".into()),
            ..Default::default()
        };
        assert!(config.open().is_err());

        let config = StoreConfig {
            token: Some("t".into()),
            ..config
        };
        assert!(config.open().is_ok());
    }

    #[test]
    fn test_token_never_serialized() {
        let config = StoreConfig {
            token: Some("secret".into()),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("secret"));
        assert!(toml_str.contains("backend = \"local\""));

        let back: StoreConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.token, None);
    }
}
