//! # Invoice Module
//!
//! Totals aggregation and the editable invoice session.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Session Flow                              │
//! │                                                                         │
//! │  add_item / remove_item / set_customer / set_customer_state            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  recompute(items, customer_state, home_state)                   │   │
//! │  │                                                                 │   │
//! │  │  supply = SupplyType::between(customer_state, home_state)       │   │
//! │  │  for each item:                                                 │   │
//! │  │     base  = quantity × unit_price                               │   │
//! │  │     tax   = compute_tax(base, rate, supply).rounded()  ◄── paise│   │
//! │  │     subtotal += base; cgst/sgst/igst += tax                     │   │
//! │  │  grand_total = subtotal + Σ tax                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  balance = grand_total − amount_received                               │
//! │                                                                         │
//! │  mark_exported() ──► every further edit fails with InvoiceFinalized    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Round Per Item
//! Each item's tax is rounded to paise before it is summed. That keeps
//! `grand_total == Σ item.amount` exact, which is what the printed table
//! shows. Rounding the summed exact tax instead can differ by a paisa per
//! item (see `test_round_per_item_differs_from_sum_then_round`).

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::locality::State;
use crate::money::Money;
use crate::tax::{compute_tax, SupplyType};
use crate::types::{
    CustomerProfile, InvoiceRecord, InvoiceStatus, InvoiceTotals, IssuerProfile, LineItem,
    NewLineItem, PaymentMethod, TaxSplit,
};
use crate::validation::{validate_amount_received, validate_customer, validate_line_item, validate_terms};
use crate::{MAX_INVOICE_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Aggregation
// =============================================================================

/// Computes invoice totals from line items and locality.
///
/// Pure: no state, no I/O. An empty slice yields all-zero totals. Sums that
/// leave `i64` paise fail instead of wrapping.
pub fn recompute(
    items: &[LineItem],
    customer_state: Option<State>,
    home_state: State,
) -> CoreResult<InvoiceTotals> {
    let supply = SupplyType::between(customer_state, home_state);

    let mut totals = InvoiceTotals::zero(supply);
    let (mut cgst, mut sgst, mut igst) = (Money::zero(), Money::zero(), Money::zero());

    for item in items {
        let base = item.base_amount();
        let tax = compute_tax(base, item.tax_rate(), supply).rounded()?;

        totals.total_quantity += item.quantity();
        totals.subtotal = add(totals.subtotal, base)?;
        totals.total_tax = add(totals.total_tax, tax.total)?;
        cgst = add(cgst, tax.cgst)?;
        sgst = add(sgst, tax.sgst)?;
        igst = add(igst, tax.igst)?;
    }

    totals.tax = match supply {
        SupplyType::IntraState => TaxSplit::IntraState { cgst, sgst },
        SupplyType::InterState => TaxSplit::InterState { igst },
    };
    totals.grand_total = add(totals.subtotal, totals.total_tax)?;

    debug!(
        items = items.len(),
        ?supply,
        subtotal = %totals.subtotal,
        grand_total = %totals.grand_total,
        "Recomputed invoice totals"
    );

    Ok(totals)
}

fn add(a: Money, b: Money) -> CoreResult<Money> {
    a.checked_add(b).ok_or_else(|| out_of_range("total").into())
}

fn balance(grand_total: Money, received: Money) -> CoreResult<Money> {
    grand_total
        .checked_sub(received)
        .ok_or_else(|| out_of_range("balance").into())
}

fn out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: i64::MIN / 100,
        max: i64::MAX / 100,
    }
}

// =============================================================================
// Invoice Session
// =============================================================================

/// The one mutable invoice being edited.
///
/// ## Ownership
/// A session is owned by whoever drives the form (CLI, UI layer). All edits
/// take `&mut self`, so there is exactly one writer and no locking.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use villa_core::invoice::InvoiceSession;
/// use villa_core::locality::State;
/// use villa_core::money::Money;
/// use villa_core::types::{IssuerProfile, NewLineItem, TaxRate};
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap().and_hms_opt(11, 0, 0).unwrap();
/// let mut session = InvoiceSession::new("VMP-17102026-0042", IssuerProfile::default(), date);
/// session.set_customer_state(Some(State::UttarPradesh)).unwrap();
/// session.add_item(NewLineItem {
///     name: "Deluxe Room".into(),
///     hsn_code: "996311".into(),
///     quantity: 2,
///     unit_price: Money::from_rupees(5000),
///     tax_rate: TaxRate::from_percent(12),
/// }).unwrap();
///
/// assert_eq!(session.record().totals().grand_total, Money::from_rupees(11_200));
/// ```
#[derive(Debug, Clone)]
pub struct InvoiceSession {
    record: InvoiceRecord,
}

impl InvoiceSession {
    /// Starts a draft invoice with zeroed totals.
    ///
    /// Check-in and check-out default to the invoice date.
    pub fn new(invoice_no: impl Into<String>, issuer: IssuerProfile, invoice_date: NaiveDateTime) -> Self {
        let supply = SupplyType::between(None, issuer.state);
        InvoiceSession {
            record: InvoiceRecord {
                invoice_no: invoice_no.into(),
                status: InvoiceStatus::Draft,
                invoice_date,
                check_in: invoice_date,
                check_out: invoice_date,
                issuer,
                customer: CustomerProfile::default(),
                items: Vec::new(),
                totals: InvoiceTotals::zero(supply),
                amount_received: Money::zero(),
                balance: Money::zero(),
                payment_method: PaymentMethod::default(),
                terms: None,
            },
        }
    }

    /// Current state of the invoice.
    pub fn record(&self) -> &InvoiceRecord {
        &self.record
    }

    /// Consumes the session, returning the record.
    pub fn into_record(self) -> InvoiceRecord {
        self.record
    }

    // -------------------------------------------------------------------------
    // Line items
    // -------------------------------------------------------------------------

    /// Validates and appends a line item, returning its id.
    pub fn add_item(&mut self, draft: NewLineItem) -> CoreResult<String> {
        self.ensure_draft()?;

        if self.record.items.len() >= MAX_INVOICE_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_INVOICE_ITEMS,
            });
        }
        if draft.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: draft.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_line_item(&draft)?;

        let item = LineItem::from_draft(draft)?;
        let id = item.id().to_string();
        self.record.items.push(item);
        if let Err(e) = self.refresh() {
            self.record.items.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Removes the item with the given id.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<LineItem> {
        self.ensure_draft()?;

        let index = self
            .record
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        let removed = self.record.items.remove(index);
        self.refresh()?;
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Customer
    // -------------------------------------------------------------------------

    /// Replaces the customer details. Totals follow the new state.
    pub fn set_customer(&mut self, customer: CustomerProfile) -> CoreResult<()> {
        self.ensure_draft()?;
        validate_customer(&customer)?;

        self.record.customer = customer;
        self.refresh()
    }

    /// Changes only the customer state.
    pub fn set_customer_state(&mut self, state: Option<State>) -> CoreResult<()> {
        self.ensure_draft()?;

        self.record.customer.state = state;
        self.refresh()
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    /// Records what the guest has paid so far.
    pub fn set_amount_received(&mut self, amount: Money) -> CoreResult<()> {
        self.ensure_draft()?;
        validate_amount_received(amount)?;

        self.record.balance = balance(self.record.totals.grand_total, amount)?;
        self.record.amount_received = amount;
        Ok(())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> CoreResult<()> {
        self.ensure_draft()?;
        self.record.payment_method = method;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Header fields
    // -------------------------------------------------------------------------

    pub fn set_invoice_no(&mut self, invoice_no: impl Into<String>) -> CoreResult<()> {
        self.ensure_draft()?;
        self.record.invoice_no = invoice_no.into();
        Ok(())
    }

    pub fn set_invoice_date(&mut self, date: NaiveDateTime) -> CoreResult<()> {
        self.ensure_draft()?;
        self.record.invoice_date = date;
        Ok(())
    }

    /// Sets the service period. Check-out before check-in is accepted as
    /// entered; the invoice only prints both timestamps.
    pub fn set_stay_period(&mut self, check_in: NaiveDateTime, check_out: NaiveDateTime) -> CoreResult<()> {
        self.ensure_draft()?;
        self.record.check_in = check_in;
        self.record.check_out = check_out;
        Ok(())
    }

    /// Sets free-text terms; blank text clears them.
    pub fn set_terms(&mut self, terms: Option<String>) -> CoreResult<()> {
        self.ensure_draft()?;

        let terms = terms.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        if let Some(text) = &terms {
            validate_terms(text)?;
        }
        self.record.terms = terms;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Marks the invoice as exported. Idempotent.
    pub fn mark_exported(&mut self) {
        if self.record.status != InvoiceStatus::Exported {
            debug!(invoice_no = %self.record.invoice_no, "Invoice marked exported");
        }
        self.record.status = InvoiceStatus::Exported;
    }

    fn ensure_draft(&self) -> CoreResult<()> {
        match self.record.status {
            InvoiceStatus::Draft => Ok(()),
            InvoiceStatus::Exported => Err(CoreError::InvoiceFinalized {
                invoice_no: self.record.invoice_no.clone(),
            }),
        }
    }

    /// Recomputes every derived field as one unit. On failure nothing
    /// derived changes.
    fn refresh(&mut self) -> CoreResult<()> {
        let record = &mut self.record;
        let totals = recompute(&record.items, record.customer.state, record.issuer.state)?;
        let balance = balance(totals.grand_total, record.amount_received)?;

        record.totals = totals;
        record.balance = balance;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
