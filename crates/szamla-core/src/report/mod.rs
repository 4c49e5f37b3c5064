//! Colored xlsx reports for the comparison passes.

use std::path::Path;

use rust_xlsxwriter::{Color, Format, Workbook};
use tracing::debug;

use crate::error::ReportError;
use crate::recon::ComparisonSheet;

/// Fill for matched data rows.
const GREEN_FILL: Color = Color::RGB(0xC6EFCE);
/// Fill for mismatched data rows.
const RED_FILL: Color = Color::RGB(0xFFC7CE);

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Write the comparison sheets to an xlsx file. The first sheet is the
/// active one; every data row is filled green or red across all populated
/// columns of its sheet.
pub fn write_report(sheets: &[ComparisonSheet], path: &Path) -> Result<()> {
    let mut workbook = build_workbook(sheets)?;
    workbook.save(path)?;
    debug!("Wrote report with {} sheets to {}", sheets.len(), path.display());
    Ok(())
}

/// In-memory variant of [`write_report`] for HTTP downloads.
pub fn report_bytes(sheets: &[ComparisonSheet]) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(sheets)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(sheets: &[ComparisonSheet]) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    let green = Format::new().set_background_color(GREEN_FILL);
    let red = Format::new().set_background_color(RED_FILL);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        let max_cols = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            if row_idx == 0 {
                for (col_idx, value) in row.iter().enumerate() {
                    worksheet.write(row_idx as u32, col_idx as u16, value.as_str())?;
                }
                continue;
            }

            let fill = if sheet.matches.get(row_idx).copied().unwrap_or(false) {
                &green
            } else {
                &red
            };

            // The fill spans the sheet's full width, ragged rows included
            for col_idx in 0..max_cols {
                let value = row.get(col_idx).map(String::as_str).unwrap_or("");
                worksheet.write_with_format(row_idx as u32, col_idx as u16, value, fill)?;
            }
        }
    }

    Ok(workbook)
}

/// Write plain string rows to a single uncolored sheet (key extraction
/// output).
pub fn write_plain_sheet(rows: &[Vec<String>], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet.write(row_idx as u32, col_idx as u16, value.as_str())?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
