//! Header-keyed invoice row table.

use std::fs;
use std::path::Path;

use crate::error::OrderError;
use crate::models::row::{ParsedRow, FIELDNAMES};
use crate::order::decode_text;

/// Delimiter of the generated invoice CSV.
const INVOICE_DELIMITER: u8 = b';';

/// Invoice rows with their header, as loaded from the generated CSV or
/// built directly from freshly parsed rows.
#[derive(Debug, Clone)]
pub struct InvoiceTable {
    /// Column names, in file order.
    pub header: Vec<String>,

    /// Data rows; each row is positionally aligned with `header`.
    pub rows: Vec<Vec<String>>,
}

impl InvoiceTable {
    /// Load the invoice CSV from disk (BOM/UTF-16 aware, `;`-delimited).
    pub fn from_path(path: &Path) -> Result<Self, OrderError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse the invoice CSV from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, OrderError> {
        let text = decode_text(data);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(INVOICE_DELIMITER)
            .flexible(true)
            .from_reader(text.as_bytes());

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { header, rows })
    }

    /// Build a table from parsed-and-translated rows, bypassing the CSV
    /// round trip (web upload path).
    pub fn from_parsed_rows(rows: &[ParsedRow]) -> Self {
        Self {
            header: FIELDNAMES.iter().map(|s| s.to_string()).collect(),
            rows: rows.iter().map(|r| r.csv_record().to_vec()).collect(),
        }
    }

    /// Look a field up by column name; absent columns read as empty.
    pub fn field<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.header
            .iter()
            .position(|h| h == name)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}
