//! Money helpers for price fields.
//!
//! The catalog collaborator serves price fields in inconsistent shapes
//! (JSON numbers in some rows, decimal strings in others). These helpers
//! give every other component a single way to turn raw text into a
//! [`Decimal`] and to render amounts for display.

use rust_decimal::Decimal;

/// Parse a decimal amount from a raw string field.
///
/// Accepts plain decimal notation with optional surrounding whitespace
/// (`"499"`, `" 12.50 "`). Returns `None` for anything else.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.trim().parse::<Decimal>().ok()
}

/// Format an amount for display with two decimal places.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("499"), Some(Decimal::new(499, 0)));
        assert_eq!(parse_amount("12.50"), Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn test_parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  19.99 "), Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("free"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12.5.0"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(10, 0)), "10.00");
        assert_eq!(format_amount(Decimal::new(1999, 2)), "19.99");
        assert_eq!(format_amount(Decimal::new(125, 1)), "12.50");
    }
}
