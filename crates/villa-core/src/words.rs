//! # Currency Text
//!
//! Amount-in-words and Indian digit grouping, as printed on the invoice.
//!
//! ```text
//!   1,25,000.50  ──►  "One Lakh Twenty Five Thousand Rupees and Fifty Paise Only"
//!                ──►  "₹ 1,25,000.50"
//! ```
//!
//! Indian numbering groups the rupee part as crore (10^7), lakh (10^5),
//! thousand (10^3) and a final remainder below one thousand.

use crate::money::Money;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// English cardinal for 0..=999. Zero is the empty string.
fn below_thousand(n: u64) -> String {
    match n {
        0 => String::new(),
        1..=19 => ONES[n as usize].to_string(),
        20..=99 => {
            let (ten, one) = ((n / 10) as usize, (n % 10) as usize);
            if one > 0 {
                format!("{} {}", TENS[ten], ONES[one])
            } else {
                TENS[ten].to_string()
            }
        }
        _ => {
            let rest = below_thousand(n % 100);
            let hundreds = format!("{} Hundred", ONES[(n / 100) as usize]);
            if rest.is_empty() {
                hundreds
            } else {
                format!("{} {}", hundreds, rest)
            }
        }
    }
}

/// Crore, lakh, thousand and remainder segments joined by spaces.
fn indian_cardinal(n: u64) -> String {
    let crore = n / 10_000_000;
    let segments = [
        (n % 10_000_000 / 100_000, " Lakh"),
        (n % 100_000 / 1000, " Thousand"),
        (n % 1000, ""),
    ];

    let mut parts = Vec::new();
    if crore > 0 {
        parts.push(format!("{} Crore", indian_cardinal(crore)));
    }
    parts.extend(
        segments
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, unit)| format!("{}{}", below_thousand(*count), unit)),
    );
    parts.join(" ")
}

/// Spells out a rupee amount for the "Amount in words" line.
///
/// An amount of exactly zero is just `"Zero"`. Any other amount with zero
/// rupees reads `"Zero Rupees and ... Paise Only"`. Negative amounts are
/// spelled by absolute value.
///
/// Crore counts of 1,000 or more are themselves spelled in Indian units
/// (`"One Thousand Crore"`).
///
/// ## Example
/// ```rust
/// use villa_core::money::Money;
/// use villa_core::words::amount_to_words;
///
/// assert_eq!(amount_to_words(Money::zero()), "Zero");
/// assert_eq!(
///     amount_to_words(Money::from_paise(125_050)),
///     "One Thousand Two Hundred Fifty Rupees and Fifty Paise Only"
/// );
/// ```
pub fn amount_to_words(amount: Money) -> String {
    if amount.is_zero() {
        return "Zero".to_string();
    }

    let abs = amount.abs();
    let rupees = abs.rupees() as u64;
    let paise = abs.paise_part() as u64;

    let mut words = if rupees == 0 {
        "Zero Rupees".to_string()
    } else {
        format!("{} Rupees", indian_cardinal(rupees))
    };

    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&below_thousand(paise));
        words.push_str(" Paise");
    }

    words.push_str(" Only");
    words
}

/// Formats an amount as `₹ 12,34,567.89` using Indian grouping.
///
/// The last three digits form one group and every group to their left has
/// two digits.
pub fn format_grouped_currency(amount: Money) -> String {
    format!("₹ {}", group_indian(amount))
}

/// Indian-grouped amount without the currency symbol (`12,34,567.89`).
pub fn group_indian(amount: Money) -> String {
    let digits = amount.rupees().unsigned_abs().to_string();
    let sign = if amount.is_negative() { "-" } else { "" };

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    format!("{}{}.{:02}", sign, grouped, amount.paise_part())
}

// =============================================================================
// Unit Tests
// =============================================================================
