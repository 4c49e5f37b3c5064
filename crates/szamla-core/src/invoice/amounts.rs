//! Locale-formatted decimal parsing and currency formatting.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a Hungarian-formatted decimal (e.g. "1 234,56" or "1234.56").
///
/// Non-breaking and ordinary spaces act as group separators and are removed;
/// a comma is the decimal point. Returns `None` for empty or unparseable
/// input — the callers decide whether that matters.
pub fn parse_locale_decimal(value: &str) -> Option<Decimal> {
    let text = value
        .replace('\u{00a0}', " ")
        .replace(' ', "")
        .replace(',', ".");
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text).ok()
}

/// Render a price with two fraction digits and a `.` decimal point.
pub fn format_currency(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_locale_decimal_accepts_comma_and_spaces() {
        assert_eq!(
            parse_locale_decimal("1 234,56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            parse_locale_decimal("1\u{00a0}234,56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(
            parse_locale_decimal("1234.56"),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(parse_locale_decimal("2"), Some(Decimal::from(2)));
    }

    #[test]
    fn parse_locale_decimal_rejects_junk() {
        assert_eq!(parse_locale_decimal(""), None);
        assert_eq!(parse_locale_decimal("   "), None);
        assert_eq!(parse_locale_decimal("n/a"), None);
        assert_eq!(parse_locale_decimal("12x34"), None);
    }

    #[test]
    fn format_currency_pads_to_two_digits() {
        assert_eq!(format_currency(Decimal::from(1000)), "1000.00");
        assert_eq!(
            format_currency(Decimal::from_str("2500.5").unwrap()),
            "2500.50"
        );
    }
}
