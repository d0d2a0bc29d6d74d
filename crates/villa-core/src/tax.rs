//! # Tax Calculator
//!
//! GST computation for a single taxable amount.
//!
//! ## Supply Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer state == home state?                                         │
//! │                                                                         │
//! │     YES  → intra-state supply                                          │
//! │            CGST = total / 2   SGST = total / 2   IGST = 0              │
//! │                                                                         │
//! │     NO   → inter-state supply (also when no state was picked)          │
//! │            CGST = 0           SGST = 0           IGST = total          │
//! │                                                                         │
//! │  total = base × rate% / 100                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! [`compute_tax`] is exact: it returns `Decimal` rupees and never rounds.
//! [`TaxBreakdown::rounded`] is the one place where a tax turns into paise.
//! The total is rounded half away from zero, CGST takes the rounded half of
//! that and SGST takes the remainder, so `cgst + sgst == total` always holds
//! in paise. A total with no paise representation is an error.
//!
//! ## Example
//! ```rust
//! use villa_core::money::Money;
//! use villa_core::tax::{compute_tax, SupplyType};
//! use villa_core::types::TaxRate;
//!
//! let tax = compute_tax(Money::from_rupees(10_000), TaxRate::from_percent(12), SupplyType::IntraState);
//! let paise = tax.rounded().unwrap();
//! assert_eq!(paise.cgst, Money::from_rupees(600));
//! assert_eq!(paise.sgst, Money::from_rupees(600));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::locality::State;
use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Homestay Slabs
// =============================================================================

/// SAC code for room accommodation services.
pub const HSN_ROOM_ACCOMMODATION: &str = "996311";

/// SAC code for food and restaurant services.
pub const HSN_FOOD_SERVICES: &str = "996331";

/// GST on food served to guests.
pub const FOOD_SERVICES_RATE: TaxRate = TaxRate::from_percent(5);

/// GST slab for a per-night room tariff.
///
/// | tariff                 | rate |
/// |------------------------|------|
/// | below ₹ 7,500          | 0%   |
/// | ₹ 7,500 to ₹ 10,000    | 12%  |
/// | above ₹ 10,000         | 18%  |
pub fn room_tariff_rate(tariff: Money) -> TaxRate {
    if tariff < Money::from_rupees(7_500) {
        TaxRate::zero()
    } else if tariff <= Money::from_rupees(10_000) {
        TaxRate::from_percent(12)
    } else {
        TaxRate::from_percent(18)
    }
}

// =============================================================================
// Supply Type
// =============================================================================

/// Whether a supply crosses a state boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    /// Customer in the home state: CGST + SGST.
    IntraState,
    /// Customer elsewhere: IGST.
    InterState,
}

impl SupplyType {
    /// Compares the customer state with the issuer's home state.
    ///
    /// A customer without a state is billed as inter-state, since nothing
    /// places them in the home state.
    pub fn between(customer: Option<State>, home: State) -> Self {
        match customer {
            Some(state) if state == home => SupplyType::IntraState,
            _ => SupplyType::InterState,
        }
    }

    /// `true` → inter-state.
    pub fn from_cross_locality(is_interstate: bool) -> Self {
        if is_interstate {
            SupplyType::InterState
        } else {
            SupplyType::IntraState
        }
    }

    pub fn is_interstate(&self) -> bool {
        matches!(self, SupplyType::InterState)
    }
}

// =============================================================================
// Tax Breakdown
// =============================================================================

/// Exact GST components in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
    pub total: Decimal,
}

/// GST components rounded to paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxAmounts {
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub total: Money,
}

impl TaxBreakdown {
    /// Rounds the breakdown to paise.
    pub fn rounded(&self) -> Result<TaxAmounts, ValidationError> {
        let total = Money::from_decimal(self.total)?;

        if self.igst.is_zero() {
            let cgst = Money::from_decimal(total.to_decimal() / Decimal::TWO)?;
            Ok(TaxAmounts {
                cgst,
                sgst: total - cgst,
                igst: Money::zero(),
                total,
            })
        } else {
            Ok(TaxAmounts {
                cgst: Money::zero(),
                sgst: Money::zero(),
                igst: total,
                total,
            })
        }
    }
}

/// Computes GST on a tax-exclusive amount.
///
/// No error conditions; negative bases are not rejected and simply produce
/// negative tax.
pub fn compute_tax(base: Money, rate: TaxRate, supply: SupplyType) -> TaxBreakdown {
    let total = base.to_decimal() * rate.percent() / Decimal::ONE_HUNDRED;

    match supply {
        SupplyType::InterState => TaxBreakdown {
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: total,
            total,
        },
        SupplyType::IntraState => {
            let half = total / Decimal::TWO;
            TaxBreakdown {
                cgst: half,
                sgst: half,
                igst: Decimal::ZERO,
                total,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
