//! # villa-core: Pure Invoice Logic for Villa Invoice
//!
//! This crate is the **heart** of Villa Invoice. It contains all GST and
//! invoice logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Villa Invoice Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    villa (CLI) / invoice form                   │   │
//! │  │   customer ──► line items ──► amount received ──► export       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ villa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    tax    │  │  invoice  │  │   words   │  │   │
//! │  │   │ LineItem  │  │  GST calc │  │  Session  │  │ in words  │  │   │
//! │  │   │  Record   │  │ SupplyType│  │  totals   │  │  ₹ 1,00.. │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │               ┌────────────────┴───────────────┐                        │
//! │  ┌────────────▼──────────────┐   ┌─────────────▼─────────────┐         │
//! │  │ villa-document            │   │ villa-store               │         │
//! │  │ layout, PDF, print        │   │ blob upload, listing      │         │
//! │  └───────────────────────────┘   └───────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, InvoiceRecord, TaxRate, etc.)
//! - [`money`] - Money type with integer paise (no floating point!)
//! - [`tax`] - GST calculation and supply type
//! - [`invoice`] - Totals aggregation and the editable session
//! - [`words`] - Amount in words, Indian digit grouping
//! - [`invoice_number`] - `VMP-DDMMYYYY-NNNN` identifiers
//! - [`locality`] - States and GST state codes
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output (except id/number generation)
//! 2. **No I/O**: file system and network access is FORBIDDEN here
//! 3. **Integer Money**: all stored amounts are paise (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use villa_core::money::Money;
//! use villa_core::tax::{compute_tax, SupplyType};
//! use villa_core::types::TaxRate;
//! use villa_core::words::amount_to_words;
//!
//! let room = Money::from_rupees(1000);
//! let tax = compute_tax(room, TaxRate::from_percent(18), SupplyType::InterState).rounded().unwrap();
//! assert_eq!(tax.igst, Money::from_rupees(180));
//!
//! let total = room + tax.total;
//! assert_eq!(amount_to_words(total), "One Thousand One Hundred Eighty Rupees Only");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod invoice_number;
pub mod locality;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use villa_core::Money` instead of
// `use villa_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{recompute, InvoiceSession};
pub use locality::State;
pub use money::Money;
pub use tax::{compute_tax, SupplyType, TaxAmounts, TaxBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of generated invoice numbers.
pub const DEFAULT_INVOICE_PREFIX: &str = "VMP";

/// Maximum line items on one invoice.
///
/// ## Business Reason
/// Keeps the document to a handful of pages; a homestay bill rarely has more
/// than a few room nights and meal lines.
pub const MAX_INVOICE_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Catches typos such as 1000 nights instead of 10.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Highest accepted unit price (₹ 1 crore).
///
/// ## Business Reason
/// Far above any tariff, and low enough that the largest invoice the other
/// limits allow stays inside `i64` paise (see [`MAX_AMOUNT_RECEIVED`]).
pub const MAX_UNIT_PRICE: Money = Money::from_rupees(10_000_000);

/// Highest accepted amount received, in either direction.
///
/// Equal to the largest possible grand total: every item at
/// [`MAX_UNIT_PRICE`] × [`MAX_ITEM_QUANTITY`], taxed at 100%.
pub const MAX_AMOUNT_RECEIVED: Money =
    Money::from_paise(MAX_UNIT_PRICE.paise() * MAX_ITEM_QUANTITY as i64 * MAX_INVOICE_ITEMS as i64 * 2);
