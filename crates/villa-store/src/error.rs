//! # Store Error Types
//!
//! Error types for blob storage and the invoice archive.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Storage             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Io                     │ │
//! │  │  ConfigLoad...  │  │  Http           │  │  InvalidKey             │ │
//! │  │  ConfigSave...  │  │  InvalidResponse│  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store error type covering configuration, transport and storage failures.
///
/// No operation retries on its own; [`StoreError::is_retryable`] only tells
/// the caller whether trying again could help.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storage configuration.
    #[error("Invalid storage configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Request(String),

    /// The blob service answered with a non-success status.
    #[error("Blob service returned {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not what the blob API documents.
    #[error("Invalid response from blob service: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Local file system failure.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blob pathname that cannot be stored safely.
    #[error("Invalid blob pathname: {0}")]
    InvalidKey(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::InvalidResponse(err.to_string())
        } else {
            StoreError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidResponse(err.to_string())
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::InvalidConfig(format!("invalid URL: {}", err))
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl StoreError {
    /// Returns true if the same call might succeed later.
    ///
    /// ## Retryable Errors
    /// - Requests that never got a response
    /// - 408, 429 and 5xx responses
    /// - Local I/O failures
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Request(_) | StoreError::Io(_) => true,
            StoreError::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        match self {
            StoreError::InvalidConfig(_) | StoreError::ConfigLoadFailed(_) | StoreError::ConfigSaveFailed(_) => true,
            StoreError::Http { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(StoreError::Request("connection reset".into()).is_retryable());
        assert!(StoreError::Http { status: 503, message: "busy".into() }.is_retryable());
        assert!(StoreError::Http { status: 429, message: "slow down".into() }.is_retryable());

        assert!(!StoreError::Http { status: 400, message: "bad".into() }.is_retryable());
        assert!(!StoreError::InvalidConfig("no base url".into()).is_retryable());
        assert!(!StoreError::InvalidResponse("not json".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(StoreError::InvalidConfig("x".into()).is_config_error());
        assert!(StoreError::Http { status: 403, message: "bad token".into() }.is_config_error());
        assert!(!StoreError::Request("x".into()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Http { status: 404, message: "not found".into() };
        assert_eq!(err.to_string(), "Blob service returned 404: not found");

        let err: StoreError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_config_error());
    }
}
