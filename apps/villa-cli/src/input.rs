//! # Invoice Input Files
//!
//! The JSON document `villa render` reads, one invoice per file.
//!
//! ```json
//! {
//!   "invoice_no": "VMP-17102026-0042",
//!   "invoice_date": "2026-10-17T10:00:00",
//!   "check_in": "2026-10-15T14:00:00",
//!   "check_out": "2026-10-17T11:00:00",
//!   "customer": { "name": "Asha Verma", "address": "12 Civil Lines", "state": "Uttar Pradesh" },
//!   "items": [
//!     { "name": "Deluxe Room", "hsn_code": "996311", "quantity": 2, "unit_price": "5000", "gst_rate": 12 }
//!   ],
//!   "amount_received": "5000",
//!   "payment_method": "Online"
//! }
//! ```
//!
//! Amounts are rupees (string or number); `gst_rate` is a percentage.
//! Missing numbers and dates are generated.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use villa_core::invoice_number::generate_invoice_number;
use villa_core::{CustomerProfile, InvoiceSession, IssuerProfile, Money, NewLineItem, PaymentMethod, TaxRate};

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceInput {
    #[serde(default)]
    pub invoice_no: Option<String>,
    #[serde(default)]
    pub invoice_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    pub customer: CustomerProfile,
    #[serde(default)]
    pub items: Vec<ItemInput>,
    #[serde(default)]
    pub amount_received: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub terms: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub hsn_code: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub gst_rate: Decimal,
}

impl ItemInput {
    fn to_draft(&self) -> Result<NewLineItem> {
        let tax_rate = TaxRate::try_from_percent(self.gst_rate)
            .with_context(|| format!("item '{}': invalid GST rate", self.name))?;
        let unit_price = Money::from_decimal(self.unit_price)
            .with_context(|| format!("item '{}': invalid unit price", self.name))?;

        Ok(NewLineItem {
            name: self.name.clone(),
            hsn_code: self.hsn_code.clone(),
            quantity: self.quantity,
            unit_price,
            tax_rate,
        })
    }
}

impl InvoiceInput {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invoice input is not valid JSON")
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Builds a draft invoice.
    ///
    /// `prefix` numbers invoices that have no `invoice_no`; `now` dates
    /// those with no `invoice_date`.
    pub fn into_session(self, issuer: IssuerProfile, prefix: &str, now: NaiveDateTime) -> Result<InvoiceSession> {
        let invoice_no = self
            .invoice_no
            .filter(|no| !no.trim().is_empty())
            .unwrap_or_else(|| generate_invoice_number(prefix));
        let invoice_date = self.invoice_date.unwrap_or(now);

        let mut session = InvoiceSession::new(invoice_no, issuer, invoice_date);
        session.set_customer(self.customer).context("invalid customer details")?;

        let check_in = self.check_in.unwrap_or(invoice_date);
        let check_out = self.check_out.unwrap_or(check_in);
        session.set_stay_period(check_in, check_out)?;

        for (index, item) in self.items.iter().enumerate() {
            let draft = item.to_draft()?;
            session
                .add_item(draft)
                .with_context(|| format!("item {} ('{}')", index + 1, item.name))?;
        }

        let received = Money::from_decimal(self.amount_received).context("invalid amount received")?;
        session.set_amount_received(received).context("invalid amount received")?;
        session.set_payment_method(self.payment_method)?;
        session.set_terms(self.terms)?;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use villa_core::{InvoiceStatus, State, TaxSplit};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    const SAMPLE: &str = r#"{
        "invoice_no": "VMP-17102026-0042",
        "invoice_date": "2026-10-17T10:00:00",
        "check_in": "2026-10-15T14:00:00",
        "check_out": "2026-10-17T11:00:00",
        "customer": {
            "name": "Asha Verma",
            "address": "12 Civil Lines",
            "city": "Agra",
            "state": "Uttar Pradesh",
            "pincode": "282001"
        },
        "items": [
            { "name": "Deluxe Room", "hsn_code": "996311", "quantity": 2, "unit_price": "5000", "gst_rate": 12 }
        ],
        "amount_received": 5000,
        "payment_method": "Online"
    }"#;

    #[test]
    fn test_sample_builds_intra_state_invoice() {
        let input = InvoiceInput::from_json(SAMPLE).unwrap();
        let session = input.into_session(IssuerProfile::default(), "VMP", at(17, 12)).unwrap();
        let record = session.record();

        assert_eq!(record.invoice_no(), "VMP-17102026-0042");
        assert_eq!(record.invoice_date(), at(17, 10));
        assert_eq!(record.check_in(), at(15, 14));
        assert_eq!(record.check_out(), at(17, 11));
        assert_eq!(record.status(), InvoiceStatus::Draft);
        assert_eq!(record.payment_method(), PaymentMethod::Online);

        let totals = record.totals();
        assert_eq!(totals.grand_total, Money::from_rupees(11_200));
        assert_eq!(
            totals.tax,
            TaxSplit::IntraState {
                cgst: Money::from_rupees(600),
                sgst: Money::from_rupees(600)
            }
        );
        assert_eq!(record.balance(), Money::from_rupees(6_200));
    }

    #[test]
    fn test_missing_number_and_dates_are_generated() {
        let input = InvoiceInput::from_json(
            r#"{ "customer": { "name": "R. Iyer", "address": "Anna Salai", "state": "Tamil Nadu" },
                 "items": [{ "name": "Breakfast", "hsn_code": "996331", "quantity": 1, "unit_price": 250.5, "gst_rate": "5" }] }"#,
        )
        .unwrap();
        let session = input.into_session(IssuerProfile::default(), "ANX", at(17, 12)).unwrap();
        let record = session.record();

        assert!(villa_core::invoice_number::is_well_formed("ANX", record.invoice_no()));
        assert_eq!(record.invoice_date(), at(17, 12));
        assert_eq!(record.check_in(), at(17, 12));
        assert_eq!(record.customer().state, Some(State::TamilNadu));
        assert!(matches!(record.totals().tax, TaxSplit::InterState { .. }));
        assert_eq!(record.amount_received(), Money::zero());
    }

    #[test]
    fn test_invalid_item_names_the_item() {
        let input = InvoiceInput::from_json(
            r#"{ "customer": { "name": "A", "address": "B" },
                 "items": [{ "name": "Room", "hsn_code": "12", "quantity": 1, "unit_price": 100, "gst_rate": 12 }] }"#,
        )
        .unwrap();
        let err = input.into_session(IssuerProfile::default(), "VMP", at(17, 12)).unwrap_err();
        assert!(format!("{:#}", err).contains("item 1 ('Room')"));
    }

    #[test]
    fn test_bad_rate_rejected() {
        let input = InvoiceInput::from_json(
            r#"{ "customer": { "name": "A", "address": "B" },
                 "items": [{ "name": "Room", "hsn_code": "996311", "quantity": 1, "unit_price": 100, "gst_rate": 120 }] }"#,
        )
        .unwrap();
        assert!(input.into_session(IssuerProfile::default(), "VMP", at(17, 12)).is_err());
    }

    #[test]
    fn test_oversized_amounts_are_errors() {
        let input = InvoiceInput::from_json(
            r#"{ "customer": { "name": "A", "address": "B" },
                 "items": [{ "name": "Suite", "hsn_code": "996311", "quantity": 2, "unit_price": "99999999999999999", "gst_rate": 12 }] }"#,
        )
        .unwrap();
        let err = input.into_session(IssuerProfile::default(), "VMP", at(17, 12)).unwrap_err();
        assert!(format!("{:#}", err).contains("item 'Suite': invalid unit price"));

        let input = InvoiceInput::from_json(
            r#"{ "customer": { "name": "A", "address": "B" },
                 "items": [{ "name": "Suite", "hsn_code": "996311", "quantity": 2, "unit_price": "20000000", "gst_rate": 12 }] }"#,
        )
        .unwrap();
        let err = input.into_session(IssuerProfile::default(), "VMP", at(17, 12)).unwrap_err();
        assert!(format!("{:#}", err).contains("item 1 ('Suite')"));

        for received in ["99999999999999999", "2000000000000000"] {
            let json = format!(
                r#"{{ "customer": {{ "name": "A", "address": "B" }}, "amount_received": "{}" }}"#,
                received
            );
            let input = InvoiceInput::from_json(&json).unwrap();
            let err = input.into_session(IssuerProfile::default(), "VMP", at(17, 12)).unwrap_err();
            assert!(format!("{:#}", err).contains("invalid amount received"));
        }
    }

    #[test]
    fn test_missing_customer_is_parse_error() {
        assert!(InvoiceInput::from_json(r#"{ "items": [] }"#).is_err());
    }
}
