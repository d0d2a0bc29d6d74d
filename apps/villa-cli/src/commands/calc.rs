//! Quick calculations: invoice numbers, GST on an amount, amount in words.

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use villa_core::invoice_number::generate_invoice_number;
use villa_core::validation::validate_amount_received;
use villa_core::words::{amount_to_words, format_grouped_currency};
use villa_core::{compute_tax, Money, SupplyType, TaxRate};

pub fn number(prefix: &str) -> String {
    generate_invoice_number(prefix)
}

/// GST on `base` at `rate` percent, one component per line.
pub fn tax(base: &str, rate: &str, interstate: bool) -> Result<String> {
    let base = amount(base)?;
    let pct: Decimal = rate
        .trim()
        .trim_end_matches('%')
        .parse()
        .with_context(|| format!("invalid GST rate '{}'", rate))?;
    let rate = TaxRate::try_from_percent(pct)?;

    let supply = SupplyType::from_cross_locality(interstate);
    let tax = compute_tax(base, rate, supply).rounded()?;

    let mut lines = vec![format!("Taxable value  {}", format_grouped_currency(base))];
    if supply.is_interstate() {
        lines.push(format!("IGST @ {} {}", rate, format_grouped_currency(tax.igst)));
    } else {
        let half = TaxRate::from_bps(rate.bps() / 2);
        lines.push(format!("CGST @ {} {}", half, format_grouped_currency(tax.cgst)));
        lines.push(format!("SGST @ {} {}", half, format_grouped_currency(tax.sgst)));
    }
    lines.push(format!("Total GST      {}", format_grouped_currency(tax.total)));
    lines.push(format!("Total          {}", format_grouped_currency(base + tax.total)));
    Ok(lines.join("\n"))
}

pub fn words(amount: &str) -> Result<String> {
    let amount = self::amount(amount)?;
    Ok(format!("{}\n{}", format_grouped_currency(amount), amount_to_words(amount)))
}

/// Parses an amount no larger than any invoice can total.
fn amount(input: &str) -> Result<Money> {
    let amount: Money = input.parse().with_context(|| format!("invalid amount '{}'", input))?;
    validate_amount_received(amount).with_context(|| format!("amount '{}' is too large", input))?;
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intra_state_tax() {
        let out = tax("10000", "12", false).unwrap();
        assert!(out.contains("CGST @ 6%"));
        assert!(out.contains("₹ 600.00"));
        assert!(out.contains("Total          ₹ 11,200.00"));
        assert!(!out.contains("IGST"));
    }

    #[test]
    fn test_inter_state_tax() {
        let out = tax("1000", "18%", true).unwrap();
        assert!(out.contains("IGST @ 18%"));
        assert!(out.contains("₹ 180.00"));
        assert!(out.contains("₹ 1,180.00"));
        assert!(!out.contains("CGST"));
    }

    #[test]
    fn test_bad_tax_input() {
        assert!(tax("abc", "12", false).is_err());
        assert!(tax("100", "twelve", false).is_err());
        assert!(tax("100", "150", false).is_err());
        assert!(tax("99999999999999999", "100", true).is_err());
        assert!(tax("90000000000000000", "100", true).is_err());
        assert!(words("90000000000000000").is_err());
    }

    #[test]
    fn test_words() {
        let out = words("1250.50").unwrap();
        assert_eq!(
            out,
            "₹ 1,250.50\nOne Thousand Two Hundred Fifty Rupees and Fifty Paise Only"
        );
        assert!(words("0").unwrap().ends_with("Zero"));
    }

    #[test]
    fn test_number_uses_prefix() {
        let no = number("ANX");
        assert!(villa_core::invoice_number::is_well_formed("ANX", &no));
    }
}
