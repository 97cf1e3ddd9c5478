//! Helpers the purchase forms call while the user is still typing.
//!
//! None of these validate a submission; they pre-fill fields and
//! format values for display.

use crate::models::{ItemCondition, Sku};
use once_cell::sync::Lazy;
use regex::Regex;

static BARCODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Z\-]+$").expect("barcode pattern is valid"));

const BARCODE_MIN_LEN: usize = 6;
const BARCODE_MAX_LEN: usize = 20;

/// Default unit cost for a freshly selected SKU.
pub fn auto_fill_unit_cost(sku: &Sku) -> f64 {
    sku.sale_base_price.unwrap_or(0.0)
}

/// Default condition grade for a new line.
///
/// The SKU is not consulted yet; new purchases default to `A` and
/// everything else to `B`.
pub fn suggest_condition(_sku: &Sku, is_new_purchase: bool) -> ItemCondition {
    if is_new_purchase {
        ItemCondition::Excellent
    } else {
        ItemCondition::Good
    }
}

/// True when `barcode` is 6-20 characters of digits, upper-case
/// letters and hyphens.
pub fn validate_barcode_format(barcode: &str) -> bool {
    (BARCODE_MIN_LEN..=BARCODE_MAX_LEN).contains(&barcode.len()) && BARCODE_PATTERN.is_match(barcode)
}

/// Formats a price as US dollars, e.g. `$1,234.56` or `-$0.50`.
pub fn format_display_price(price: f64) -> String {
    let body = format_number(price.abs(), 2);
    if price < 0.0 {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Formats `value` with `precision` decimals and comma thousands
/// separators.  Ties round half away from zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let factor = 10f64.powi(precision as i32);
    let body = format!("{:.*}", precision, (value * factor).round() / factor);
    let (int_part, fraction) = match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body.as_str(), ""),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int_part),
    };
    format!("{}{}{}", sign, group_digits(digits), fraction)
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().enumerate() {
        if count != 0 && (digits.len() - count) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(price: Option<f64>) -> Sku {
        Sku {
            id: "s1".into(),
            sku_name: "Tent".into(),
            is_saleable: true,
            sale_base_price: price,
        }
    }

    #[test]
    fn unit_cost_falls_back_to_zero() {
        assert_eq!(auto_fill_unit_cost(&sku(Some(49.5))), 49.5);
        assert_eq!(auto_fill_unit_cost(&sku(None)), 0.0);
    }

    #[test]
    fn suggested_condition_depends_only_on_newness() {
        assert_eq!(suggest_condition(&sku(None), true), ItemCondition::Excellent);
        assert_eq!(suggest_condition(&sku(Some(1.0)), false), ItemCondition::Good);
    }

    #[test]
    fn barcode_format() {
        assert!(validate_barcode_format("ABC-123"));
        assert!(validate_barcode_format("123456"));
        assert!(validate_barcode_format("A1234567890123456789"));
        assert!(!validate_barcode_format("12345"));
        assert!(!validate_barcode_format("A12345678901234567890"));
        assert!(!validate_barcode_format("abc-123"));
        assert!(!validate_barcode_format("ABC 123"));
        assert!(!validate_barcode_format(""));
    }

    #[test]
    fn display_price_uses_dollars_and_grouping() {
        assert_eq!(format_display_price(1234.56), "$1,234.56");
        assert_eq!(format_display_price(0.0), "$0.00");
        assert_eq!(format_display_price(999.999), "$1,000.00");
        assert_eq!(format_display_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_display_price(-12.5), "-$12.50");
    }

    #[test]
    fn display_price_rounds_half_cents_away_from_zero() {
        assert_eq!(format_display_price(0.125), "$0.13");
        assert_eq!(format_display_price(2.625), "$2.63");
        assert_eq!(format_display_price(-2.625), "-$2.63");
    }

    #[test]
    fn number_grouping_without_decimals() {
        assert_eq!(format_number(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_number(100.0, 0), "100");
        assert_eq!(format_number(-4321.0, 1), "-4,321.0");
    }
}
