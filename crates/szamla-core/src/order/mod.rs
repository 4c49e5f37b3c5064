//! Order file reading - xlsx/xlsm via calamine, delimited text with
//! delimiter sniffing and encoding fallbacks.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use crate::error::OrderError;

/// Result type for order file operations.
pub type Result<T> = std::result::Result<T, OrderError>;

/// ZIP local-file-header signature; xlsx files are ZIP containers.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Read an order file into raw string rows, header included.
///
/// Spreadsheet containers are detected by extension or ZIP signature (some
/// exports ship a zipped xlsx under a `.csv` name); everything else is
/// treated as delimited text.
pub fn read_order_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let bytes = fs::read(path)?;

    if is_spreadsheet(path, &bytes) {
        debug!("Reading {} as a spreadsheet", path.display());
        read_spreadsheet(&bytes)
    } else {
        debug!("Reading {} as delimited text", path.display());
        read_delimited(&bytes)
    }
}

/// Byte-slice variant of [`read_order_rows`] for uploaded files.
pub fn read_order_rows_from_bytes(data: &[u8]) -> Result<Vec<Vec<String>>> {
    if data.starts_with(ZIP_MAGIC) {
        read_spreadsheet(data)
    } else {
        read_delimited(data)
    }
}

fn is_spreadsheet(path: &Path, bytes: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            e == "xlsx" || e == "xlsm"
        })
        .unwrap_or(false);

    by_extension || bytes.starts_with(ZIP_MAGIC)
}

/// Read the first sheet of an xlsx/xlsm workbook as stringified cell values.
/// Only cached values are read; formulas are not evaluated.
fn read_spreadsheet(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| OrderError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| OrderError::Spreadsheet("workbook has no sheets".to_string()))?
        .map_err(|e| OrderError::Spreadsheet(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Parse delimited text rows, sniffing the delimiter.
fn read_delimited(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = decode_text(bytes);
    let delimiter = sniff_delimiter(&text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Decode file bytes to text: UTF-16 when a UTF-16 BOM leads, otherwise
/// UTF-8 (BOM stripped) with a Windows-1252 fallback for legacy exports.
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        let (text, _, _) = encoding_rs::UTF_16LE.decode(bytes);
        return text.into_owned();
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        let (text, _, _) = encoding_rs::UTF_16BE.decode(bytes);
        return text.into_owned();
    }

    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Detect the most likely field delimiter among `;`, `,` and tab by checking
/// consistency across the first few lines. Comma wins when nothing sniffs.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b';', b',', b'\t'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}
