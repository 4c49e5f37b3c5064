//! Two-way reconciliation of order rows against invoice rows.

mod engine;
mod table;

pub use engine::{
    compare_invoice_rows, compare_order_rows, left_until_underscore, ComparisonSheet,
};
pub use table::InvoiceTable;
