//! Compare command - reconcile an order file against the invoice CSV.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use szamla_core::{compare_invoice_rows, compare_order_rows, read_order_rows, write_report, InvoiceTable};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Order Excel/CSV file
    #[arg(long, default_value = "order/belso-megrendeles.csv")]
    order: PathBuf,

    /// Generated invoice CSV file
    #[arg(long, default_value = "samples/invoice-output.csv")]
    invoice: PathBuf,

    /// Output path for the colored comparison report
    #[arg(long, default_value = "order/compare-output.xlsx")]
    output: PathBuf,

    /// Which side drives the comparison (informational; both passes always run)
    #[arg(long, value_enum, default_value = "order")]
    base: BaseSide,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum BaseSide {
    /// Order rows drive the first sheet
    Order,
    /// Invoice rows drive the first sheet
    Invoice,
}

pub fn run(args: CompareArgs) -> anyhow::Result<()> {
    if !args.order.is_file() {
        anyhow::bail!("Order file not found: {}", args.order.display());
    }
    if !args.invoice.is_file() {
        anyhow::bail!("Invoice file not found: {}", args.invoice.display());
    }

    info!("Comparison base: {:?}", args.base);

    let order_rows = read_order_rows(&args.order)?;
    if order_rows.is_empty() {
        anyhow::bail!("No order rows found to compare.");
    }

    let invoice = InvoiceTable::from_path(&args.invoice)?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let sheets = [
        compare_order_rows(&order_rows, &invoice),
        compare_invoice_rows(&order_rows, &invoice),
    ];
    write_report(&sheets, &args.output)?;

    println!(
        "{} Report written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}
