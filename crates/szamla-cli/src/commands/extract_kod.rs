//! Extract-kod command - dump raw vs. derived SKU keys from an order file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use szamla_core::{left_until_underscore, read_order_rows, write_plain_sheet};

/// 0-based index of the code-bearing order column.
const KOD_COLUMN: usize = 3;

/// Arguments for the extract-kod command.
#[derive(Args)]
pub struct ExtractKodArgs {
    /// Order Excel/CSV file
    #[arg(long, default_value = "order/belso-megrendeles.csv")]
    order: PathBuf,

    /// Output path for the extracted keys
    #[arg(long, default_value = "order/alkatr_szam_bal.xlsx")]
    output: PathBuf,
}

pub fn run(args: ExtractKodArgs) -> anyhow::Result<()> {
    if !args.order.is_file() {
        anyhow::bail!("Order file not found: {}", args.order.display());
    }

    let order_rows = read_order_rows(&args.order)?;
    let output_rows = build_output_rows(&order_rows);
    if output_rows.is_empty() {
        anyhow::bail!("No order rows found.");
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    write_plain_sheet(&output_rows, &args.output)?;

    println!(
        "{} Extracted keys written to {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

fn build_output_rows(order_rows: &[Vec<String>]) -> Vec<Vec<String>> {
    if order_rows.is_empty() {
        return Vec::new();
    }

    let mut output = vec![vec![
        "alkatr_szam".to_string(),
        "alkatr_szam_bal".to_string(),
    ]];

    for row in &order_rows[1..] {
        let raw = row.get(KOD_COLUMN).map(String::as_str).unwrap_or("");
        output.push(vec![raw.to_string(), left_until_underscore(raw)]);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_header_and_derived_keys() {
        let rows = vec![
            vec!["a".into(), "b".into(), "c".into(), "kod".into()],
            vec![
                "1".into(),
                "2".into(),
                "3".into(),
                "ABCDEFGHIJKLMNO_TAIL".into(),
            ],
        ];

        let output = build_output_rows(&rows);
        assert_eq!(output.len(), 2);
        assert_eq!(output[0], vec!["alkatr_szam", "alkatr_szam_bal"]);
        assert_eq!(output[1], vec!["ABCDEFGHIJKLMNO_TAIL", "ABCDEFGHIJKLMNO"]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(build_output_rows(&[]).is_empty());
    }

    #[test]
    fn short_rows_read_the_code_column_as_empty() {
        let rows = vec![vec!["h".to_string()], vec!["only-one".to_string()]];
        let output = build_output_rows(&rows);
        assert_eq!(output[1], vec!["", ""]);
    }
}
