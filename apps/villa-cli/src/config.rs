//! # Application Configuration
//!
//! Settings for the `villa` command, read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VILLA_*`, `BLOB_READ_WRITE_TOKEN`)
//! 2. Config file (`villa.toml`)
//! 3. Defaults (this file)
//!
//! ## Example `villa.toml`
//! ```toml
//! [issuer]
//! name = "VMP Villa Home Stay"
//! state = "Uttar Pradesh"
//!
//! [invoice]
//! prefix = "VMP"
//!
//! [export]
//! download_dir = "."
//!
//! [storage]
//! backend = "local"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use villa_core::validation::validate_invoice_prefix;
use villa_core::{IssuerProfile, DEFAULT_INVOICE_PREFIX};
use villa_store::{StoreConfig, StoreError, StoreResult};

/// Complete `villa.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The business printed in the invoice header.
    #[serde(default)]
    pub issuer: IssuerProfile,

    #[serde(default)]
    pub invoice: InvoiceSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub storage: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    /// Prefix of generated invoice numbers.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_INVOICE_PREFIX.to_string()
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        InvoiceSettings {
            prefix: default_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Where `render` writes PDFs when `--out` is not given.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            download_dir: default_download_dir(),
        }
    }
}

impl AppConfig {
    /// Loads configuration: file, then environment, then validation.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file. The blob token is never written.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        std::fs::write(&path, contents)?;

        info!(?path, "Saved config");
        Ok(path)
    }

    pub fn to_toml(&self) -> StoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        validate_invoice_prefix(&self.invoice.prefix)
            .map_err(|e| StoreError::InvalidConfig(format!("invoice.prefix: {}", e)))?;

        if self.issuer.name.trim().is_empty() {
            return Err(StoreError::InvalidConfig("issuer.name must not be empty".into()));
        }

        if self.export.download_dir.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig("export.download_dir must not be empty".into()));
        }

        self.storage.validate()
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// ## Keys
    /// - `VILLA_INVOICE_PREFIX`: invoice number prefix
    /// - `VILLA_DOWNLOAD_DIR`: default output directory
    /// - storage keys, see [`StoreConfig::apply_overrides_from`]
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup("VILLA_INVOICE_PREFIX") {
            debug!(prefix = %prefix, "Overriding invoice prefix from environment");
            self.invoice.prefix = prefix.trim().to_string();
        }

        if let Some(dir) = lookup("VILLA_DOWNLOAD_DIR") {
            self.export.download_dir = PathBuf::from(dir);
        }

        self.storage.apply_overrides_from(&lookup);
    }

    /// Returns the default config file path.
    ///
    /// - **Linux**: `~/.config/villa-invoice/villa.toml`
    /// - **macOS**: `~/Library/Application Support/in.vmpvilla.villa-invoice/villa.toml`
    /// - **Windows**: `%APPDATA%\vmpvilla\villa-invoice\config\villa.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "vmpvilla", "villa-invoice").map(|dirs| dirs.config_dir().join("villa.toml"))
    }
}
