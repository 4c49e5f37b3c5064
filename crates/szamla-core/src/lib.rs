//! Core library for Hungarian invoice reconciliation.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract)
//! - Normalization of extraction artifacts and the 9-line table row scanner
//! - Canonical product/color translation and SKU code derivation
//! - Order file reading (xlsx/xlsm or sniffed delimited text)
//! - Queue-based two-way reconciliation of orders against invoices
//! - Colored xlsx report output

pub mod error;
pub mod invoice;
pub mod models;
pub mod order;
pub mod pdf;
pub mod recon;
pub mod report;

pub use error::{OrderError, PdfError, ReportError, Result, SzamlaError, TranslationError};
pub use invoice::{apply_translations, format_currency, normalize_text, parse_locale_decimal, scan_rows};
pub use models::row::{ParsedRow, FIELDNAMES};
pub use models::translations::{TranslationEntry, TranslationTable};
pub use order::{read_order_rows, read_order_rows_from_bytes};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use recon::{
    compare_invoice_rows, compare_order_rows, left_until_underscore, ComparisonSheet, InvoiceTable,
};
pub use report::{report_bytes, write_plain_sheet, write_report};

#[cfg(test)]
mod tests {
    use super::*;

    /// Full pipeline: normalized text through scan, translate and both
    /// comparison passes.
    #[test]
    fn parse_translate_compare_roundtrip() {
        let text = "fejlec\nNettó ár\n1\nAblak panel\nfehÃ©r\n718x250\n1,25\n2\n2,50\n1000,00\n2500,00\nÖsszesen: 2500,00\n";
        let normalized = normalize_text(text);

        let mut table = TranslationTable::default();
        table.products.insert(
            "Ablak panel".to_string(),
            TranslationEntry {
                name: "Panel".to_string(),
                code: "PNL_X1".to_string(),
            },
        );
        table.colors.insert(
            "fehér".to_string(),
            TranslationEntry {
                name: "Fehér".to_string(),
                code: "C2".to_string(),
            },
        );

        let rows = apply_translations(scan_rows(&normalized).collect(), &table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kod, "NFAH_X1_C2_718x250");

        let invoice = InvoiceTable::from_parsed_rows(&rows);
        let order = vec![
            vec!["h".to_string(); 10],
            vec![
                "x".to_string(),
                "x".to_string(),
                "x".to_string(),
                "NFAH_X1_C2_718x250".to_string(),
                "x".to_string(),
                "2".to_string(),
                "x".to_string(),
                "x".to_string(),
                "1000".to_string(),
                "2500".to_string(),
            ],
        ];

        let order_sheet = compare_order_rows(&order, &invoice);
        assert_eq!(order_sheet.rows.len(), 2);
        assert!(order_sheet.matches[1]);

        let invoice_sheet = compare_invoice_rows(&order, &invoice);
        assert_eq!(invoice_sheet.rows.len(), 2);
        assert!(invoice_sheet.matches[1]);
    }
}
