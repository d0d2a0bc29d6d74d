//! # Invoice Numbers
//!
//! Human-readable invoice identifiers of the form `PREFIX-DDMMYYYY-NNNN`.
//!
//! ```text
//!   VMP-17102026-0042
//!   │   │        └── random 0000-9999, zero padded
//!   │   └─────────── local issue date, day first
//!   └─────────────── business prefix
//! ```
//!
//! Numbers are NOT guaranteed unique: two invoices issued on the same day
//! collide with probability 1/10000 per pair.

use chrono::{Local, NaiveDate};
use rand::Rng;

/// Generates an invoice number for today's local date.
///
/// ## Example
/// ```rust
/// use villa_core::invoice_number::{generate_invoice_number, is_well_formed};
///
/// let no = generate_invoice_number("VMP");
/// assert!(is_well_formed("VMP", &no));
/// ```
pub fn generate_invoice_number(prefix: &str) -> String {
    generate_with(prefix, Local::now().date_naive(), &mut rand::thread_rng())
}

/// Generates an invoice number for a fixed date and random source.
pub fn generate_with<R: Rng + ?Sized>(prefix: &str, date: NaiveDate, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..=9999);
    format!("{}-{}-{:04}", prefix, date.format("%d%m%Y"), suffix)
}

/// Checks that `s` is `prefix-DDMMYYYY-NNNN` with a real calendar date.
pub fn is_well_formed(prefix: &str, s: &str) -> bool {
    let Some(rest) = s.strip_prefix(prefix).and_then(|r| r.strip_prefix('-')) else {
        return false;
    };

    let mut parts = rest.split('-');
    let (Some(date), Some(counter), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

    date.len() == 8
        && all_digits(date)
        && counter.len() == 4
        && all_digits(counter)
        && NaiveDate::parse_from_str(date, "%d%m%Y").is_ok()
}

/// File name an exported invoice document is saved and uploaded under.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced with `-` so the name is
/// safe as both a path component and a blob key. An empty number becomes
/// `Invoice-draft.pdf`.
pub fn document_filename(invoice_no: &str) -> String {
    let trimmed = invoice_no.trim();
    if trimmed.is_empty() {
        return "Invoice-draft.pdf".to_string();
    }

    let safe: String = trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '-' })
        .collect();
    format!("Invoice-{}.pdf", safe)
}
