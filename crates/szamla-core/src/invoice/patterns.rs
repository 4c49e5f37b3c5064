//! Sentinels and line classification for the invoice table scanner.

use lazy_static::lazy_static;
use regex::Regex;

/// Heading that opens the price table ("net price" column header).
pub const TABLE_START: &str = "Nettó ár";

/// Prefix of the summary line that closes the table.
pub const SUMMARY_PREFIX: &str = "Összesen";

/// Prefix of the optional per-square-meter price line trailing a record.
pub const SQM_PRICE_PREFIX: &str = "Ft/m2";

/// Separator inside a WxH-style dimension string.
pub const DIMENSION_SEPARATOR: char = 'x';

lazy_static! {
    /// A line consisting only of digits - the item ordinal that starts a
    /// candidate record.
    pub static ref NUMERIC_LINE: Regex = Regex::new(r"^\d+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_line_matches_ordinals_only() {
        assert!(NUMERIC_LINE.is_match("1"));
        assert!(NUMERIC_LINE.is_match("42"));
        assert!(!NUMERIC_LINE.is_match("1,25"));
        assert!(!NUMERIC_LINE.is_match("1 000"));
        assert!(!NUMERIC_LINE.is_match(""));
        assert!(!NUMERIC_LINE.is_match("4a"));
    }
}
