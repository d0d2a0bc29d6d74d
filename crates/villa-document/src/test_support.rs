//! Shared invoice fixtures for this crate's unit tests.

use chrono::NaiveDate;
use villa_core::{CustomerProfile, InvoiceRecord, InvoiceSession, IssuerProfile, Money, NewLineItem, State, TaxRate};

pub fn sample_session() -> InvoiceSession {
    let day = |d: u32, h: u32| {
        NaiveDate::from_ymd_opt(2026, 10, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    };

    let mut session = InvoiceSession::new("VMP-17102026-0042", IssuerProfile::default(), day(17, 10));
    session.set_stay_period(day(15, 14), day(17, 11)).unwrap();
    session
}

pub fn guest(state: Option<State>) -> CustomerProfile {
    CustomerProfile {
        name: "Asha Verma".into(),
        address: "12 Civil Lines".into(),
        city: "Agra".into(),
        state,
        pincode: "282001".into(),
        contact_no: "9876543210".into(),
        ..Default::default()
    }
}

/// A record with `count` one-night items at ₹1,000 and 12% GST.
pub fn record_with_items(count: usize, state: Option<State>) -> InvoiceRecord {
    let mut session = sample_session();
    session.set_customer(guest(state)).unwrap();
    for i in 0..count {
        session
            .add_item(NewLineItem {
                name: format!("Item {}", i + 1),
                hsn_code: "996311".into(),
                quantity: 1,
                unit_price: Money::from_rupees(1000),
                tax_rate: TaxRate::from_percent(12),
            })
            .unwrap();
    }
    session.set_amount_received(Money::from_rupees(500)).unwrap();
    session.into_record()
}
