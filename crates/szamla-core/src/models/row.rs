//! Parsed invoice line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::invoice::amounts::format_currency;

/// Column order of the invoice CSV output. The reconciliation engine looks
/// fields up by these names, so the header is part of the data contract.
pub const FIELDNAMES: [&str; 9] = [
    "termek", "szin", "meret", "m2", "db", "ossz_m2", "egyseg_ar", "netto_ar", "kod",
];

/// One line item scanned from the invoice table.
///
/// Free-text fields hold the normalized original text until the translator
/// replaces them with canonical names; `kod` is empty until derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRow {
    /// Product name.
    pub termek: String,

    /// Color name.
    pub szin: String,

    /// Size string (WxH dimensions).
    pub meret: String,

    /// Area per unit in square meters.
    pub m2: Decimal,

    /// Quantity.
    pub db: Decimal,

    /// Total area in square meters.
    pub ossz_m2: Decimal,

    /// Unit price.
    pub egyseg_ar: Decimal,

    /// Net price.
    pub netto_ar: Decimal,

    /// Derived SKU code.
    #[serde(default)]
    pub kod: String,
}

impl ParsedRow {
    /// Render the row in [`FIELDNAMES`] order for CSV output.
    ///
    /// Areas and quantity keep the scale they were parsed with; prices are
    /// rendered as currency with two fraction digits.
    pub fn csv_record(&self) -> [String; 9] {
        [
            self.termek.clone(),
            self.szin.clone(),
            self.meret.clone(),
            self.m2.to_string(),
            self.db.to_string(),
            self.ossz_m2.to_string(),
            format_currency(self.egyseg_ar),
            format_currency(self.netto_ar),
            self.kod.clone(),
        ]
    }
}
