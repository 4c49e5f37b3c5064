//! State-machine scan of normalized invoice text into line items.

use tracing::{debug, trace};

use crate::models::row::ParsedRow;

use super::amounts::parse_locale_decimal;
use super::patterns::{
    DIMENSION_SEPARATOR, NUMERIC_LINE, SQM_PRICE_PREFIX, SUMMARY_PREFIX, TABLE_START,
};

/// Forward-only scanner over the lines of an invoice.
///
/// Outside the table, lines are skipped until one equals [`TABLE_START`].
/// Inside, every purely numeric line with at least 8 lines after it starts a
/// candidate 9-line record: ordinal, product, color, size, then five
/// locale-formatted numerics (unit area, quantity, total area, unit price,
/// net price). A candidate is accepted only if the size carries the `x`
/// dimension separator and all five numerics parse. Rejected candidates are
/// ordinary text; the cursor moves on by one line.
pub struct RowScanner<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    inside_table: bool,
}

impl<'a> RowScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
            inside_table: false,
        }
    }

    /// Try to read the 9-line record starting at the current ordinal line.
    fn read_record(&self) -> Option<ParsedRow> {
        let termek = self.lines[self.pos + 1].trim();
        let szin = self.lines[self.pos + 2].trim();
        let meret = self.lines[self.pos + 3].trim();

        if !meret.contains(DIMENSION_SEPARATOR) {
            trace!("Rejecting candidate at line {}: size {:?} has no dimension separator", self.pos, meret);
            return None;
        }

        let m2 = parse_locale_decimal(self.lines[self.pos + 4])?;
        let db = parse_locale_decimal(self.lines[self.pos + 5])?;
        let ossz_m2 = parse_locale_decimal(self.lines[self.pos + 6])?;
        let egyseg_ar = parse_locale_decimal(self.lines[self.pos + 7])?;
        let netto_ar = parse_locale_decimal(self.lines[self.pos + 8])?;

        Some(ParsedRow {
            termek: termek.to_string(),
            szin: szin.to_string(),
            meret: meret.to_string(),
            m2,
            db,
            ossz_m2,
            egyseg_ar,
            netto_ar,
            kod: String::new(),
        })
    }
}

impl Iterator for RowScanner<'_> {
    type Item = ParsedRow;

    fn next(&mut self) -> Option<ParsedRow> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();

            if !self.inside_table {
                if line == TABLE_START {
                    debug!("Entering price table at line {}", self.pos);
                    self.inside_table = true;
                }
                self.pos += 1;
                continue;
            }

            if line.starts_with(SUMMARY_PREFIX) {
                debug!("Leaving price table at line {}", self.pos);
                self.inside_table = false;
                self.pos += 1;
                continue;
            }

            if NUMERIC_LINE.is_match(line) && self.pos + 8 < self.lines.len() {
                if let Some(row) = self.read_record() {
                    self.pos += 9;
                    if self
                        .lines
                        .get(self.pos)
                        .is_some_and(|l| l.trim().starts_with(SQM_PRICE_PREFIX))
                    {
                        self.pos += 1;
                    }
                    return Some(row);
                }
            }

            self.pos += 1;
        }

        None
    }
}

/// Scan normalized invoice text into a lazy sequence of line items.
pub fn scan_rows(text: &str) -> RowScanner<'_> {
    RowScanner::new(text)
}
