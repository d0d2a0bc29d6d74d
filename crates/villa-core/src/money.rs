//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a GST invoice this shows up as a CGST line of 300.00 and an        │
//! │  SGST line of 299.99 for the same 600.00 of tax.                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹ 1,250.50 = 125050 paise                                           │
//! │    Exact splits happen in `Decimal`, results are rounded back to paise │
//! │    exactly once, at a documented point (see `tax` and `invoice`).      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use villa_core::money::Money;
//!
//! // Create from paise (preferred)
//! let tariff = Money::from_paise(500_000); // ₹ 5,000.00
//!
//! // Arithmetic operations
//! let two_nights = tariff * 2_u32;                 // ₹ 10,000.00
//! let with_extra = two_nights + Money::from_paise(5_050);
//! assert_eq!(with_extra.to_string(), "10050.50");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount stored in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative when the guest overpays
/// - **Single field tuple struct**: serializes as a bare integer
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  LineItem.unit_price ──► base (× qty) ──► GST split ──► LineItem.amount │
/// │                                                                         │
/// │  InvoiceTotals.subtotal ──► grand_total ──► balance (− received)       │
/// │                                                                         │
/// │  grand_total ──► amount_to_words() ──► "... Rupees ... Only"           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use villa_core::money::Money;
    ///
    /// let price = Money::from_paise(125_050);
    /// assert_eq!(price.rupees(), 1250);
    /// assert_eq!(price.paise_part(), 50);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees and paise.
    ///
    /// For negative amounts only the rupee part carries the sign:
    /// `from_rupees_paise(-5, 50)` is −₹ 5.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Converts an exact rupee amount to paise, rounding half away from zero.
    ///
    /// This is the single rounding point used by the tax and invoice
    /// modules. `0.005` becomes `0.01`, `-0.005` becomes `-0.01`. Amounts
    /// with no `i64` paise representation are rejected.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use villa_core::money::Money;
    ///
    /// let exact = Decimal::new(10_005, 3); // 10.005
    /// assert_eq!(Money::from_decimal(exact).unwrap().paise(), 1001);
    /// ```
    pub fn from_decimal(rupees: Decimal) -> Result<Self, ValidationError> {
        rupees
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|paise| paise.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|paise| paise.to_i64())
            .map(Money)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "amount".to_string(),
                min: i64::MIN / 100,
                max: i64::MAX / 100,
            })
    }

    /// Returns the exact rupee amount as a decimal (`125050` → `1250.50`).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (sign preserved).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Only for values already known to fit, such as a stored line item.
    /// Use [`Money::checked_mul_quantity`] on unvalidated input.
    ///
    /// ## Example
    /// ```rust
    /// use villa_core::money::Money;
    ///
    /// let night = Money::from_rupees(5000);
    /// assert_eq!(night.multiply_quantity(2), Money::from_rupees(10_000));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// `self × qty`, or `None` on overflow.
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// `self - other`, or `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal form (`1250.50`, `-5.50`), as printed in table cells.
///
/// Use [`crate::words::format_grouped_currency`] for the `₹ 1,250.50` form.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Parses user-entered rupee amounts: `"1250.5"`, `"1,250.50"`, `"₹ 100"`.
///
/// More than two decimals are rounded half away from zero.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .trim_start_matches('₹')
            .trim_start_matches("Rs.")
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let rupees = Decimal::from_str(&cleaned).map_err(|e| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: e.to_string(),
        })?;
        Money::from_decimal(rupees)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(125_050);
        assert_eq!(money.paise(), 125_050);
        assert_eq!(money.rupees(), 1250);
        assert_eq!(money.paise_part(), 50);
    }

    #[test]
    fn test_from_rupees_paise() {
        assert_eq!(Money::from_rupees_paise(10, 99).paise(), 1099);
        assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1_120_000).to_string(), "11200.00");
        assert_eq!(Money::from_paise(500).to_string(), "5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_paise(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_decimal_round_trip_rounds_half_away_from_zero() {
        let paise = |d: Decimal| Money::from_decimal(d).unwrap().paise();
        assert_eq!(paise(Decimal::new(300, 0)), 30_000);
        assert_eq!(paise(Decimal::new(2_525, 3)), 253);
        assert_eq!(paise(Decimal::new(2_524, 3)), 252);
        assert_eq!(paise(Decimal::new(-2_525, 3)), -253);
        assert_eq!(Money::from_paise(125_050).to_decimal(), Decimal::new(125_050, 2));
    }

    #[test]
    fn test_parse() {
        assert_eq!("1250.50".parse::<Money>().unwrap(), Money::from_paise(125_050));
        assert_eq!("1,250.5".parse::<Money>().unwrap(), Money::from_paise(125_050));
        assert_eq!("₹ 100".parse::<Money>().unwrap(), Money::from_rupees(100));
        assert_eq!("Rs.7500".parse::<Money>().unwrap(), Money::from_rupees(7500));
        assert_eq!("0.005".parse::<Money>().unwrap(), Money::from_paise(1));
        assert!("".parse::<Money>().is_err());
        assert!("twelve".parse::<Money>().is_err());
    }

    #[test]
    fn test_oversized_amount_rejected_not_clamped() {
        let err = "99999999999999999".parse::<Money>().unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { ref field, .. } if field == "amount"));
        assert!(Money::from_decimal(Decimal::MAX).is_err());
        assert!(Money::from_decimal(Decimal::MIN).is_err());

        // Largest whole-rupee amount that still fits.
        let max_rupees = Decimal::from(i64::MAX / 100);
        assert_eq!(Money::from_decimal(max_rupees).unwrap().rupees(), i64::MAX / 100);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_paise(i64::MAX / 2 + 1);
        assert_eq!(big.checked_mul_quantity(2), None);
        assert_eq!(big.checked_add(big), None);
        assert_eq!(Money::from_paise(i64::MIN).checked_sub(Money::from_paise(1)), None);

        let night = Money::from_rupees(5000);
        assert_eq!(night.checked_mul_quantity(2), Some(Money::from_rupees(10_000)));
        assert_eq!(night.checked_add(night), Some(Money::from_rupees(10_000)));
        assert_eq!(night.checked_sub(night), Some(Money::zero()));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3_u32).paise(), 3000);
        assert_eq!((b - a).paise(), -500);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.paise(), 2000);
    }

    #[test]
    fn test_zero_and_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_paise(1).is_positive());
        assert!(Money::from_paise(-1).is_negative());
        assert_eq!(Money::from_paise(-550).abs().paise(), 550);
    }
}
