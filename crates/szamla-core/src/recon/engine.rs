//! Queue-based matching of order rows to invoice rows.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::invoice::amounts::parse_locale_decimal;

use super::table::InvoiceTable;

/// 1-based order-file column carrying the SKU code.
const ORDER_COL_KOD: usize = 4;
/// 1-based order-file column carrying the quantity.
const ORDER_COL_DB: usize = 6;
/// 1-based order-file column carrying the unit price.
const ORDER_COL_EGYSEG_AR: usize = 9;
/// 1-based order-file column carrying the net price.
const ORDER_COL_NETTO_AR: usize = 10;

/// One output sheet of a comparison pass: rows plus per-row match flags
/// (the header row counts as matched so the flags stay index-aligned).
#[derive(Debug, Clone)]
pub struct ComparisonSheet {
    /// Sheet name in the report workbook.
    pub name: String,

    /// Output rows, header first.
    pub rows: Vec<Vec<String>>,

    /// Per-row match flag, aligned with `rows`.
    pub matches: Vec<bool>,
}

/// Truncate an order code before the first `_` found at or after character
/// index 15; the whole trimmed value when no such `_` exists. Stable under
/// repeated application.
pub fn left_until_underscore(value: &str) -> String {
    let text = value.trim();
    if text.is_empty() {
        return String::new();
    }

    for (char_pos, (byte_idx, ch)) in text.char_indices().enumerate() {
        if char_pos >= 15 && ch == '_' {
            return text[..byte_idx].to_string();
        }
    }

    text.to_string()
}

/// Numeric field equality under locale normalization: two unparseable values
/// are equal, one unparseable is unequal, otherwise exact decimal comparison.
fn numbers_equal(left: &str, right: &str) -> bool {
    match (parse_locale_decimal(left), parse_locale_decimal(right)) {
        (None, None) => true,
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

/// Fetch a 1-based column from an arbitrary-width row; out of range reads
/// as empty.
fn column(row: &[String], index: usize) -> &str {
    index
        .checked_sub(1)
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}

/// Per-key FIFO queues of invoice row indices, in original row order.
fn build_invoice_queues(invoice: &InvoiceTable) -> HashMap<String, VecDeque<usize>> {
    let mut queues: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (idx, row) in invoice.rows.iter().enumerate() {
        let code = invoice.field(row, "kod").trim().to_string();
        queues.entry(code).or_default().push_back(idx);
    }
    queues
}

/// Per-key FIFO queues of order data-row indices (header excluded).
fn build_order_queues(order_rows: &[Vec<String>]) -> HashMap<String, VecDeque<usize>> {
    let mut queues: HashMap<String, VecDeque<usize>> = HashMap::new();
    for (idx, row) in order_rows.iter().enumerate().skip(1) {
        let code = left_until_underscore(column(row, ORDER_COL_KOD));
        queues.entry(code).or_default().push_back(idx);
    }
    queues
}

/// Order-driven pass: every order data row, in order, consumes the oldest
/// invoice row sharing its key. Emits the original row plus the computed
/// key, the status and the mismatching field names.
pub fn compare_order_rows(
    order_rows: &[Vec<String>],
    invoice: &InvoiceTable,
) -> ComparisonSheet {
    let mut sheet = ComparisonSheet {
        name: "Order_to_Invoice".to_string(),
        rows: Vec::new(),
        matches: Vec::new(),
    };

    let Some(order_header) = order_rows.first() else {
        return sheet;
    };

    let mut queues = build_invoice_queues(invoice);

    let mut header = order_header.clone();
    header.extend(
        ["processed_kod", "status", "mismatch_details"]
            .iter()
            .map(|s| s.to_string()),
    );
    sheet.rows.push(header);
    sheet.matches.push(true);

    for row in &order_rows[1..] {
        let order_kod = left_until_underscore(column(row, ORDER_COL_KOD));
        let invoice_row = queues
            .get_mut(&order_kod)
            .and_then(|queue| queue.pop_front())
            .map(|idx| &invoice.rows[idx]);

        let mut mismatches: Vec<&str> = Vec::new();
        match invoice_row {
            None => mismatches.push("missing_invoice_row"),
            Some(inv) => {
                if order_kod.trim() != invoice.field(inv, "kod").trim() {
                    mismatches.push("kod");
                }
                if !numbers_equal(column(row, ORDER_COL_DB), invoice.field(inv, "db")) {
                    mismatches.push("db");
                }
                if !numbers_equal(
                    column(row, ORDER_COL_EGYSEG_AR),
                    invoice.field(inv, "egyseg_ar"),
                ) {
                    mismatches.push("egyseg_ar");
                }
                if !numbers_equal(
                    column(row, ORDER_COL_NETTO_AR),
                    invoice.field(inv, "netto_ar"),
                ) {
                    mismatches.push("netto_ar");
                }
            }
        }

        let matched = mismatches.is_empty();
        let status = if matched { "OK" } else { "Mismatch" };

        let mut out = row.clone();
        out.push(order_kod);
        out.push(status.to_string());
        out.push(mismatches.join(", "));
        sheet.rows.push(out);
        sheet.matches.push(matched);
    }

    debug!(
        "Order-driven pass: {} data rows, {} matched",
        sheet.rows.len().saturating_sub(1),
        sheet.matches.iter().skip(1).filter(|m| **m).count()
    );

    sheet
}

/// Invoice-driven pass: every invoice row, in order, consumes the oldest
/// order row sharing its key. The key itself is not re-checked - a paired
/// row matched on it by construction.
pub fn compare_invoice_rows(
    order_rows: &[Vec<String>],
    invoice: &InvoiceTable,
) -> ComparisonSheet {
    let mut queues = build_order_queues(order_rows);

    let mut header = invoice.header.clone();
    header.extend(["status", "mismatch_details"].iter().map(|s| s.to_string()));

    let mut sheet = ComparisonSheet {
        name: "Invoice_to_Order".to_string(),
        rows: vec![header],
        matches: vec![true],
    };

    for invoice_row in &invoice.rows {
        let invoice_code = invoice.field(invoice_row, "kod").trim().to_string();
        let order_row = queues
            .get_mut(&invoice_code)
            .and_then(|queue| queue.pop_front())
            .map(|idx| &order_rows[idx]);

        let mut mismatches: Vec<&str> = Vec::new();
        match order_row {
            None => mismatches.push("missing_order_row"),
            Some(ord) => {
                if !numbers_equal(column(ord, ORDER_COL_DB), invoice.field(invoice_row, "db")) {
                    mismatches.push("db");
                }
                if !numbers_equal(
                    column(ord, ORDER_COL_EGYSEG_AR),
                    invoice.field(invoice_row, "egyseg_ar"),
                ) {
                    mismatches.push("egyseg_ar");
                }
                if !numbers_equal(
                    column(ord, ORDER_COL_NETTO_AR),
                    invoice.field(invoice_row, "netto_ar"),
                ) {
                    mismatches.push("netto_ar");
                }
            }
        }

        let matched = mismatches.is_empty();
        let status = if matched { "OK" } else { "Mismatch" };

        // Re-project through the header so ragged rows stay aligned
        let mut out: Vec<String> = invoice
            .header
            .iter()
            .map(|name| invoice.field(invoice_row, name).to_string())
            .collect();
        out.push(status.to_string());
        out.push(mismatches.join(", "));
        sheet.rows.push(out);
        sheet.matches.push(matched);
    }

    debug!(
        "Invoice-driven pass: {} data rows, {} matched",
        sheet.rows.len().saturating_sub(1),
        sheet.matches.iter().skip(1).filter(|m| **m).count()
    );

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    /// Order row with the code in column 4, quantity in 6, prices in 9/10.
    fn order_row(kod: &str, db: &str, egyseg_ar: &str, netto_ar: &str) -> Vec<String> {
        strings(&["x", "x", "x", kod, "x", db, "x", "x", egyseg_ar, netto_ar])
    }

    fn invoice_table(rows: &[(&str, &str, &str, &str)]) -> InvoiceTable {
        InvoiceTable {
            header: strings(&["kod", "db", "egyseg_ar", "netto_ar"]),
            rows: rows
                .iter()
                .map(|(kod, db, unit, net)| strings(&[kod, db, unit, net]))
                .collect(),
        }
    }

    #[test]
    fn left_until_underscore_truncates_from_position_15() {
        assert_eq!(left_until_underscore("ABCDEFGHIJKLMNO_X"), "ABCDEFGHIJKLMNO");
        assert_eq!(left_until_underscore("AB_CDEFGHIJKLMNOPQ_X"), "AB_CDEFGHIJKLMNOPQ");
        assert_eq!(left_until_underscore("  short_code  "), "short_code");
        assert_eq!(left_until_underscore(""), "");
    }

    #[test]
    fn left_until_underscore_is_truncation_stable() {
        let samples = ["NFAH_X1_C2_718x250_EXTRA", "plain", "AAAAAAAAAAAAAAA_B_C"];
        for sample in samples {
            let once = left_until_underscore(sample);
            assert_eq!(left_until_underscore(&once), once);
        }
    }

    #[test]
    fn matching_row_is_ok_with_empty_mismatch_list() {
        let order = vec![
            strings(&["h1"]),
            order_row("ABC123", "2", "1000,00", "2500,00"),
        ];
        let invoice = invoice_table(&[("ABC123", "2", "1000.00", "2500.00")]);

        let sheet = compare_order_rows(&order, &invoice);
        assert_eq!(sheet.rows.len(), 2);
        let data = &sheet.rows[1];
        assert_eq!(data[data.len() - 3], "ABC123");
        assert_eq!(data[data.len() - 2], "OK");
        assert_eq!(data[data.len() - 1], "");
        assert!(sheet.matches[1]);
    }

    #[test]
    fn missing_invoice_key_is_flagged() {
        let order = vec![strings(&["h1"]), order_row("GONE", "1", "1", "1")];
        let invoice = invoice_table(&[]);

        let sheet = compare_order_rows(&order, &invoice);
        let data = &sheet.rows[1];
        assert_eq!(data[data.len() - 2], "Mismatch");
        assert_eq!(data[data.len() - 1], "missing_invoice_row");
        assert!(!sheet.matches[1]);
    }

    #[test]
    fn field_level_mismatches_are_listed_in_order() {
        let order = vec![
            strings(&["h1"]),
            order_row("ABC123", "3", "1000,00", "9999"),
        ];
        let invoice = invoice_table(&[("ABC123", "2", "1000.00", "2500.00")]);

        let sheet = compare_order_rows(&order, &invoice);
        assert_eq!(sheet.rows[1].last().unwrap(), "db, netto_ar");
    }

    #[test]
    fn both_unparseable_numerics_compare_equal() {
        let order = vec![strings(&["h1"]), order_row("ABC123", "n/a", "1", "1")];
        let invoice = invoice_table(&[("ABC123", "-", "1", "1")]);

        let sheet = compare_order_rows(&order, &invoice);
        assert_eq!(sheet.rows[1][sheet.rows[1].len() - 2], "OK");
    }

    #[test]
    fn duplicate_keys_pair_in_original_relative_order() {
        let order = vec![
            strings(&["h1"]),
            order_row("DUP", "1", "10", "10"),
            order_row("DUP", "2", "20", "40"),
        ];
        let invoice = invoice_table(&[("DUP", "1", "10", "10"), ("DUP", "2", "20", "40")]);

        let sheet = compare_order_rows(&order, &invoice);
        assert!(sheet.matches[1]);
        assert!(sheet.matches[2]);

        // Swapping the invoice side breaks both pairings - never cross-matched
        let swapped = invoice_table(&[("DUP", "2", "20", "40"), ("DUP", "1", "10", "10")]);
        let sheet = compare_order_rows(&order, &swapped);
        assert!(!sheet.matches[1]);
        assert!(!sheet.matches[2]);
    }

    #[test]
    fn pass_cardinality_follows_the_driving_side() {
        let order = vec![
            strings(&["h1"]),
            order_row("A", "1", "1", "1"),
            order_row("B", "1", "1", "1"),
            order_row("C", "1", "1", "1"),
        ];
        let invoice = invoice_table(&[("A", "1", "1", "1"), ("Z", "1", "1", "1")]);

        let order_sheet = compare_order_rows(&order, &invoice);
        assert_eq!(order_sheet.rows.len() - 1, order.len() - 1);

        let invoice_sheet = compare_invoice_rows(&order, &invoice);
        assert_eq!(invoice_sheet.rows.len() - 1, invoice.rows.len());
    }

    #[test]
    fn invoice_pass_flags_missing_order_rows() {
        let order = vec![strings(&["h1"])];
        let invoice = invoice_table(&[("LONE", "1", "1", "1")]);

        let sheet = compare_invoice_rows(&order, &invoice);
        assert_eq!(sheet.rows[1].last().unwrap(), "missing_order_row");
        assert!(!sheet.matches[1]);
    }

    #[test]
    fn invoice_pass_does_not_recheck_the_key() {
        // Order code truncates to the invoice kod; only numerics are checked
        let order = vec![
            strings(&["h1"]),
            order_row("ABCDEFGHIJKLMNO_TAIL", "2", "10", "20"),
        ];
        let invoice = invoice_table(&[("ABCDEFGHIJKLMNO", "2", "10", "20")]);

        let sheet = compare_invoice_rows(&order, &invoice);
        assert_eq!(sheet.rows[1][sheet.rows[1].len() - 2], "OK");
    }

    #[test]
    fn empty_order_rows_produce_an_empty_order_sheet() {
        let invoice = invoice_table(&[("A", "1", "1", "1")]);
        let sheet = compare_order_rows(&[], &invoice);
        assert!(sheet.rows.is_empty());
    }
}
