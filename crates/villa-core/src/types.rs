//! # Domain Types
//!
//! Core domain types used throughout Villa Invoice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InvoiceRecord  │   │    LineItem     │   │ CustomerProfile │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoice_no     │   │  id (UUID)      │   │  name           │       │
//! │  │  status         │◄──│  hsn_code       │   │  address        │       │
//! │  │  items          │   │  quantity       │   │  state (opt)    │       │
//! │  │  totals         │   │  amount (deriv) │   │  gstin (opt)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ InvoiceStatus   │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Draft          │   │  Cash           │       │
//! │  │  1200 = 12%     │   │  Exported       │   │  Online         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Fields
//! `LineItem::amount`, `InvoiceTotals` and the balance are never written by
//! callers. Their fields are private and only [`crate::invoice`] computes them.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::locality::State;
use crate::money::Money;
use crate::tax::{compute_tax, SupplyType};

// =============================================================================
// Tax Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% (room tariff slab), 500 bps = 5% (food)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage (`12` → 12%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    /// Creates a tax rate from an exact percentage such as `2.5`.
    ///
    /// Rejects negative rates, rates above 100% and rates finer than
    /// one basis point.
    pub fn try_from_percent(pct: Decimal) -> Result<Self, ValidationError> {
        let out_of_range = || ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: 0,
            max: 100,
        };

        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(out_of_range());
        }

        let bps = pct * Decimal::ONE_HUNDRED;
        if bps.fract() != Decimal::ZERO {
            return Err(ValidationError::InvalidFormat {
                field: "gst_rate".to_string(),
                reason: "at most two decimal places".to_string(),
            });
        }

        bps.to_u32().map(TaxRate).ok_or_else(out_of_range)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact percentage (`1200` → `12`).
    #[inline]
    pub fn percent(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// `12%`, `2.5%`, `0%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent().normalize())
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// Lifecycle of an invoice record.
///
/// ```text
///   Draft ──(export)──► Exported
///     ▲                    │
///     └── edits allowed    └── edits rejected (CoreError::InvoiceFinalized)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Items and customer details can still change.
    #[default]
    Draft,
    /// A document was produced from this record.
    Exported,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the guest paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Cash at the desk.
    #[default]
    Cash,
    /// UPI, card or bank transfer.
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::Online => f.write_str("Online"),
        }
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// A line item as entered on the form, before it joins an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewLineItem {
    pub name: String,
    /// HSN/SAC classification code, e.g. `996311`.
    pub hsn_code: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub tax_rate: TaxRate,
}

/// A line item on an invoice.
///
/// `amount` is fixed when the item is created:
/// `quantity × unit_price` plus the item's GST rounded to paise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineItem {
    id: String,
    name: String,
    hsn_code: String,
    quantity: u32,
    unit_price: Money,
    tax_rate: TaxRate,
    amount: Money,
}

impl LineItem {
    /// Builds a line item with a fresh UUID v4 id.
    ///
    /// The draft is expected to be validated already
    /// (see [`crate::validation::validate_line_item`]).
    pub fn from_draft(draft: NewLineItem) -> Result<Self, ValidationError> {
        Self::with_id(uuid::Uuid::new_v4().to_string(), draft)
    }

    /// Builds a line item with a caller-chosen id.
    ///
    /// Fails when the line value or its tax does not fit in paise.
    pub fn with_id(id: impl Into<String>, draft: NewLineItem) -> Result<Self, ValidationError> {
        let overflow = || ValidationError::OutOfRange {
            field: "line amount".to_string(),
            min: 0,
            max: i64::MAX / 100,
        };

        let base = draft.unit_price.checked_mul_quantity(draft.quantity).ok_or_else(overflow)?;
        // The total tax does not depend on the supply type, only its split does.
        let tax = compute_tax(base, draft.tax_rate, SupplyType::IntraState).rounded()?.total;
        let amount = base.checked_add(tax).ok_or_else(overflow)?;

        Ok(LineItem {
            id: id.into(),
            name: draft.name.trim().to_string(),
            hsn_code: draft.hsn_code.trim().to_string(),
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            tax_rate: draft.tax_rate,
            amount,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hsn_code(&self) -> &str {
        &self.hsn_code
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Tax-exclusive line value (`quantity × unit_price`).
    #[inline]
    pub fn base_amount(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Tax-inclusive line value.
    pub fn amount(&self) -> Money {
        self.amount
    }
}

// =============================================================================
// Parties
// =============================================================================

/// The guest or company being billed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerProfile {
    pub name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    pub address: String,
    #[serde(default)]
    pub city: String,
    /// `None` until a state is picked.
    #[serde(default)]
    pub state: Option<State>,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub contact_no: String,
    #[serde(default)]
    pub gstin: Option<String>,
}

impl CustomerProfile {
    /// Name shown after "Bill To": the company when given, else the guest.
    pub fn bill_to(&self) -> &str {
        match self.company_name.as_deref().map(str::trim) {
            Some(company) if !company.is_empty() => company,
            _ => self.name.trim(),
        }
    }

    /// GSTIN, if one was entered.
    pub fn gstin(&self) -> Option<&str> {
        self.gstin.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }
}

/// The business issuing the invoice.
///
/// There is exactly one issuer. The default is the homestay's registered
/// identity; configuration may override individual fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct IssuerProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub gstin: String,
    /// Home state, compared against the customer state for every invoice.
    pub state: State,
}

impl Default for IssuerProfile {
    fn default() -> Self {
        IssuerProfile {
            name: "VMP Villa Home Stay".to_string(),
            address: "A-73, KPS Town, Baroli Ahir, Shamsabad Road, Agra, UP. 283125".to_string(),
            phone: "9258555345".to_string(),
            email: "support@vmpvilla.in".to_string(),
            gstin: "09CAFPB2385C1Z1".to_string(),
            state: State::UttarPradesh,
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// How the GST of an invoice is split.
///
/// Exactly one arm applies per invoice. An intra-state invoice never carries
/// IGST and an inter-state invoice never carries CGST/SGST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaxSplit {
    IntraState { cgst: Money, sgst: Money },
    InterState { igst: Money },
}

impl TaxSplit {
    /// Zero tax of the given supply type.
    pub fn zero(supply: SupplyType) -> Self {
        match supply {
            SupplyType::IntraState => TaxSplit::IntraState {
                cgst: Money::zero(),
                sgst: Money::zero(),
            },
            SupplyType::InterState => TaxSplit::InterState { igst: Money::zero() },
        }
    }

    pub fn supply_type(&self) -> SupplyType {
        match self {
            TaxSplit::IntraState { .. } => SupplyType::IntraState,
            TaxSplit::InterState { .. } => SupplyType::InterState,
        }
    }

    /// Sum of all components.
    pub fn total(&self) -> Money {
        match self {
            TaxSplit::IntraState { cgst, sgst } => *cgst + *sgst,
            TaxSplit::InterState { igst } => *igst,
        }
    }
}

/// Derived invoice totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    pub total_quantity: u32,
    /// Σ quantity × unit price, tax-exclusive.
    pub subtotal: Money,
    pub tax: TaxSplit,
    pub total_tax: Money,
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// All-zero totals for an invoice with no items.
    pub fn zero(supply: SupplyType) -> Self {
        InvoiceTotals {
            total_quantity: 0,
            subtotal: Money::zero(),
            tax: TaxSplit::zero(supply),
            total_tax: Money::zero(),
            grand_total: Money::zero(),
        }
    }
}

// =============================================================================
// Invoice Record
// =============================================================================

/// A complete invoice, ready to be laid out.
///
/// Records are produced by [`crate::invoice::InvoiceSession`]; the derived
/// fields always agree with the items, the customer state and the amount
/// received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct InvoiceRecord {
    pub(crate) invoice_no: String,
    pub(crate) status: InvoiceStatus,
    #[ts(as = "String")]
    pub(crate) invoice_date: NaiveDateTime,
    #[ts(as = "String")]
    pub(crate) check_in: NaiveDateTime,
    #[ts(as = "String")]
    pub(crate) check_out: NaiveDateTime,
    pub(crate) issuer: IssuerProfile,
    pub(crate) customer: CustomerProfile,
    pub(crate) items: Vec<LineItem>,
    pub(crate) totals: InvoiceTotals,
    pub(crate) amount_received: Money,
    pub(crate) balance: Money,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) terms: Option<String>,
}

impl InvoiceRecord {
    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn invoice_date(&self) -> NaiveDateTime {
        self.invoice_date
    }

    pub fn check_in(&self) -> NaiveDateTime {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDateTime {
        self.check_out
    }

    pub fn issuer(&self) -> &IssuerProfile {
        &self.issuer
    }

    pub fn customer(&self) -> &CustomerProfile {
        &self.customer
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn totals(&self) -> &InvoiceTotals {
        &self.totals
    }

    pub fn amount_received(&self) -> Money {
        self.amount_received
    }

    /// Grand total minus amount received. Negative when overpaid.
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn terms(&self) -> Option<&str> {
        self.terms.as_deref()
    }

    /// Supply type of this invoice, from the customer and home states.
    pub fn supply_type(&self) -> SupplyType {
        SupplyType::between(self.customer.state, self.issuer.state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
