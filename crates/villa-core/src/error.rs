//! # Error Types
//!
//! Domain-specific error types for villa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  villa-core errors (this file)                                         │
//! │  ├── CoreError        - Invoice session rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  villa-document errors (separate crate)                                │
//! │  └── RenderError      - Capture / PDF / export failures                │
//! │                                                                         │
//! │  villa-store errors (separate crate)                                   │
//! │  └── StoreError       - Blob upload / listing / config failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (CLI) → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax calculation, totals and amount-in-words have no error paths at all.
//! Only the session aggregate and input validation can fail.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Invoice session errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item id is not part of the invoice.
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    /// The invoice was already exported and can no longer be edited.
    ///
    /// ## User Workflow
    /// ```text
    /// Export PDF ──► status = Exported
    ///      │
    ///      ▼
    /// add_item(...)
    ///      │
    ///      ▼
    /// InvoiceFinalized { invoice_no: "VMP-17102026-0042" }
    /// ```
    #[error("Invoice {invoice_no} is already exported, cannot modify")]
    InvoiceFinalized { invoice_no: String },

    /// Invoice has reached the maximum number of line items.
    #[error("Invoice cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when a line item, customer or configuration value is rejected
/// before it reaches the invoice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (HSN code, GSTIN, pincode, amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvoiceFinalized {
            invoice_no: "VMP-17102026-0042".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invoice VMP-17102026-0042 is already exported, cannot modify"
        );

        let err = CoreError::QuantityTooLarge {
            requested: 1200,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1200 exceeds maximum allowed (999)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "address".to_string(),
            max: 500,
        };
        assert_eq!(err.to_string(), "address must be at most 500 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "hsn_code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
