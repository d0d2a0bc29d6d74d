//! # Validation Module
//!
//! Input validation for line items, customers and settings.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input parsing (CLI JSON / form)                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Money / TaxRate / State parsing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths                                          │
//! │  └── HSN, GSTIN, pincode formats                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: InvoiceSession                                               │
//! │  ├── Item count / quantity limits                                      │
//! │  └── Draft-only edits                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tax math itself never validates: negative amounts simply flow through.
//!
//! ## Usage
//! ```rust
//! use villa_core::validation::{validate_hsn_code, validate_gstin};
//!
//! validate_hsn_code("996311").unwrap();
//! validate_gstin("09CAFPB2385C1Z1").unwrap();
//! assert!(validate_hsn_code("99A311").is_err());
//! ```

use crate::error::ValidationError;
use crate::locality::State;
use crate::money::Money;
use crate::types::{CustomerProfile, NewLineItem, TaxRate};
use crate::{MAX_AMOUNT_RECEIVED, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_ADDRESS_LEN: usize = 500;
const MAX_TERMS_LEN: usize = 2000;
const MAX_PREFIX_LEN: usize = 10;

fn required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates an item name (required, at most 200 characters).
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    required("name", name, MAX_NAME_LEN)
}

/// Validates an HSN/SAC classification code.
///
/// ## Rules
/// - Digits only
/// - 4, 6 or 8 digits long
///
/// ## Example
/// ```rust
/// use villa_core::validation::validate_hsn_code;
///
/// assert!(validate_hsn_code("9963").is_ok());
/// assert!(validate_hsn_code("996331").is_ok());
/// assert!(validate_hsn_code("99631").is_err());
/// ```
pub fn validate_hsn_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "hsn_code".to_string(),
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) || !matches!(code.len(), 4 | 6 | 8) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must be 4, 6 or 8 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Invoice: Add Item                                                      │
/// │                                                                         │
/// │  User enters quantity (nights): 3                                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty == 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// Zero is allowed (complimentary items); negative prices are not, and
/// neither is anything above [`MAX_UNIT_PRICE`].
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit_price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE.rupees(),
        });
    }

    Ok(())
}

/// Validates the amount received from the guest.
///
/// Negative amounts (refunds) are accepted up to the same magnitude as
/// [`MAX_AMOUNT_RECEIVED`].
pub fn validate_amount_received(amount: Money) -> ValidationResult<()> {
    let limit = MAX_AMOUNT_RECEIVED.paise();
    if !(-limit..=limit).contains(&amount.paise()) {
        return Err(ValidationError::OutOfRange {
            field: "amount_received".to_string(),
            min: -MAX_AMOUNT_RECEIVED.rupees(),
            max: MAX_AMOUNT_RECEIVED.rupees(),
        });
    }

    Ok(())
}

/// Validates a GST rate (0% to 100%).
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if rate.bps() > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

/// Validates a complete line item draft.
pub fn validate_line_item(item: &NewLineItem) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_hsn_code(&item.hsn_code)?;
    validate_quantity(item.quantity)?;
    validate_unit_price(item.unit_price)?;
    validate_tax_rate(item.tax_rate)?;
    Ok(())
}

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates a 15-character GSTIN.
///
/// ## Layout
/// ```text
///   09 CAFPB2385C 1 Z 1
///   ││ └───┬────┘ │ │ └─ check character
///   ││     │      │ └─── always 'Z'
///   ││     │      └───── entity number
///   ││     └──────────── PAN (5 letters, 4 digits, 1 letter)
///   └┴────────────────── state code
/// ```
///
/// The check character is not verified.
pub fn validate_gstin(gstin: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "gstin".to_string(),
        reason: reason.to_string(),
    };

    let g = gstin.trim();
    let bytes = g.as_bytes();

    if bytes.len() != 15 || !g.is_ascii() {
        return Err(invalid("must be 15 characters"));
    }

    if State::from_code(&g[..2]).is_none() {
        return Err(invalid("unknown state code"));
    }

    let pan = &bytes[2..12];
    let pan_ok = pan[..5].iter().all(u8::is_ascii_uppercase)
        && pan[5..9].iter().all(u8::is_ascii_digit)
        && pan[9].is_ascii_uppercase();
    if !pan_ok {
        return Err(invalid("PAN segment is malformed"));
    }

    let tail_ok = (bytes[12].is_ascii_uppercase() || bytes[12].is_ascii_digit())
        && bytes[13] == b'Z'
        && (bytes[14].is_ascii_uppercase() || bytes[14].is_ascii_digit());
    if !tail_ok {
        return Err(invalid("must end with <entity>Z<check>"));
    }

    Ok(())
}

/// Validates an Indian 6-digit pincode.
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    let p = pincode.trim();
    if p.len() != 6 || !p.chars().all(|c| c.is_ascii_digit()) || p.starts_with('0') {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must be 6 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates a contact number: digits with optional `+`, spaces and hyphens.
pub fn validate_contact_no(contact: &str) -> ValidationResult<()> {
    let c = contact.trim();
    let digits = c.chars().filter(char::is_ascii_digit).count();

    let allowed = c
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch == '+' || ch == ' ' || ch == '-');
    if !allowed || !(10..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "contact_no".to_string(),
            reason: "must contain 10 to 15 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates a customer profile.
///
/// ## Rules
/// - `name` and `address` are required
/// - `pincode` and `contact_no` are checked only when filled in
/// - a GSTIN must be well formed and, when a state is picked, carry that
///   state's code
pub fn validate_customer(customer: &CustomerProfile) -> ValidationResult<()> {
    required("name", &customer.name, MAX_NAME_LEN)?;
    required("address", &customer.address, MAX_ADDRESS_LEN)?;

    if let Some(company) = customer.company_name.as_deref() {
        if company.trim().chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "company_name".to_string(),
                max: MAX_NAME_LEN,
            });
        }
    }

    if !customer.pincode.trim().is_empty() {
        validate_pincode(&customer.pincode)?;
    }

    if !customer.contact_no.trim().is_empty() {
        validate_contact_no(&customer.contact_no)?;
    }

    if let Some(gstin) = customer.gstin() {
        validate_gstin(gstin)?;

        if let Some(state) = customer.state {
            if !gstin.starts_with(state.code()) {
                return Err(ValidationError::InvalidFormat {
                    field: "gstin".to_string(),
                    reason: format!("state code does not match {} ({})", state, state.code()),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Misc Validators
// =============================================================================

/// Validates free-text terms and conditions.
pub fn validate_terms(terms: &str) -> ValidationResult<()> {
    if terms.chars().count() > MAX_TERMS_LEN {
        return Err(ValidationError::TooLong {
            field: "terms".to_string(),
            max: MAX_TERMS_LEN,
        });
    }
    Ok(())
}

/// Validates an invoice number prefix such as `VMP`.
///
/// ## Rules
/// - 1 to 10 characters
/// - ASCII letters and digits only
pub fn validate_invoice_prefix(prefix: &str) -> ValidationResult<()> {
    required("invoice prefix", prefix, MAX_PREFIX_LEN)?;

    if !prefix.trim().chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "invoice prefix".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerProfile {
        CustomerProfile {
            name: "Asha Verma".to_string(),
            address: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: Some(State::Maharashtra),
            pincode: "411001".to_string(),
            contact_no: "+91 98765 43210".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_hsn_code() {
        assert!(validate_hsn_code("996311").is_ok());
        assert!(validate_hsn_code("9963").is_ok());
        assert!(validate_hsn_code("99631100").is_ok());

        assert!(validate_hsn_code("").is_err());
        assert!(validate_hsn_code("99631").is_err());
        assert!(validate_hsn_code("SAC996").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_rupees(7500)).is_ok());
        assert!(validate_unit_price(Money::from_paise(-1)).is_err());

        assert!(validate_unit_price(MAX_UNIT_PRICE).is_ok());
        assert!(validate_unit_price(MAX_UNIT_PRICE + Money::from_paise(1)).is_err());
        assert!(validate_unit_price(Money::from_paise(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_amount_received() {
        assert!(validate_amount_received(Money::zero()).is_ok());
        assert!(validate_amount_received(Money::from_rupees(-500)).is_ok());
        assert!(validate_amount_received(MAX_AMOUNT_RECEIVED).is_ok());

        assert!(validate_amount_received(MAX_AMOUNT_RECEIVED + Money::from_paise(1)).is_err());
        assert!(validate_amount_received(Money::from_paise(i64::MIN)).is_err());
    }

    #[test]
    fn test_validate_line_item() {
        let mut item = NewLineItem {
            name: "Breakfast".to_string(),
            hsn_code: "996331".to_string(),
            quantity: 2,
            unit_price: Money::from_rupees(250),
            tax_rate: TaxRate::from_percent(5),
        };
        assert!(validate_line_item(&item).is_ok());

        item.name = "   ".to_string();
        assert_eq!(
            validate_line_item(&item),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );

        item.name = "Breakfast".to_string();
        item.tax_rate = TaxRate::from_bps(10_001);
        assert!(validate_line_item(&item).is_err());
    }

    #[test]
    fn test_validate_gstin() {
        assert!(validate_gstin("09CAFPB2385C1Z1").is_ok());
        assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());

        assert!(validate_gstin("").is_err());
        assert!(validate_gstin("99CAFPB2385C1Z1").is_err());
        assert!(validate_gstin("09CAFPB2385C1X1").is_err());
        assert!(validate_gstin("09cafpb2385c1z1").is_err());
        assert!(validate_gstin("09CAFPB2385C1Z").is_err());
    }

    #[test]
    fn test_validate_customer() {
        assert!(validate_customer(&customer()).is_ok());

        let mut c = customer();
        c.name.clear();
        assert!(validate_customer(&c).is_err());

        let mut c = customer();
        c.pincode = "4110".to_string();
        assert!(validate_customer(&c).is_err());

        let mut c = customer();
        c.pincode.clear();
        c.contact_no.clear();
        assert!(validate_customer(&c).is_ok());

        let mut c = customer();
        c.contact_no = "call me".to_string();
        assert!(validate_customer(&c).is_err());
    }

    #[test]
    fn test_customer_gstin_must_match_state() {
        let mut c = customer();
        c.gstin = Some("27AAPFU0939F1ZV".to_string());
        assert!(validate_customer(&c).is_ok());

        c.state = Some(State::UttarPradesh);
        assert!(validate_customer(&c).is_err());

        c.state = None;
        assert!(validate_customer(&c).is_ok());

        c.gstin = Some("  ".to_string());
        assert!(validate_customer(&c).is_ok());
    }

    #[test]
    fn test_validate_invoice_prefix() {
        assert!(validate_invoice_prefix("VMP").is_ok());
        assert!(validate_invoice_prefix("").is_err());
        assert!(validate_invoice_prefix("VMP-").is_err());
        assert!(validate_invoice_prefix("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_terms() {
        assert!(validate_terms("No refunds after check-in.").is_ok());
        assert!(validate_terms(&"x".repeat(2001)).is_err());
    }
}
