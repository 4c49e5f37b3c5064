//! Canonical naming and SKU code derivation for scanned rows.

use tracing::trace;

use crate::models::row::ParsedRow;
use crate::models::translations::TranslationTable;

/// The one dimension that always maps to the fixed-size SKU family.
pub const FIXED_DIMENSION: &str = "718x250";

/// SKU family prefix for the fixed dimension.
const FIXED_SIZE_PREFIX: &str = "NFAH";

/// SKU family prefix for custom (non-standard) dimensions.
const CUSTOM_SIZE_PREFIX: &str = "NFAY";

/// Translate every row, replacing display names and deriving `kod`.
pub fn apply_translations(rows: Vec<ParsedRow>, table: &TranslationTable) -> Vec<ParsedRow> {
    rows.into_iter()
        .map(|row| translate_row(row, table))
        .collect()
}

/// Replace the product/color display names by their canonical forms and
/// derive the SKU code.
///
/// Unmapped names are not an error: the literal text stands in for both the
/// canonical name and the code. The size is compared and emitted with all
/// whitespace stripped.
pub fn translate_row(mut row: ParsedRow, table: &TranslationTable) -> ParsedRow {
    let product = table.products.get(&row.termek);
    let color = table.colors.get(&row.szin);

    let product_code = product.map(|t| t.code.as_str()).unwrap_or(&row.termek);
    let color_code = color.map(|t| t.code.as_str()).unwrap_or(&row.szin);

    // Last underscore-delimited segment of the canonical product code;
    // without a mapping, the untranslated product text.
    let model_code = match product {
        Some(entry) => entry.code.rsplit('_').next().unwrap_or(&entry.code),
        None => row.termek.as_str(),
    };

    let size: String = row.meret.split_whitespace().collect();

    let kod = if size == FIXED_DIMENSION {
        join_code(&[FIXED_SIZE_PREFIX, model_code, color_code, &size])
    } else if table.standard_sizes.contains(size.as_str()) {
        join_code(&[product_code, color_code, &size])
    } else {
        join_code(&[CUSTOM_SIZE_PREFIX, model_code, color_code, &size])
    };

    trace!("Derived kod {:?} for {:?} / {:?} / {:?}", kod, row.termek, row.szin, size);

    if let Some(entry) = product {
        row.termek = entry.name.clone();
    }
    if let Some(entry) = color {
        row.szin = entry.name.clone();
    }
    row.meret = size;
    row.kod = kod;

    row
}

/// Join code segments with `_`, dropping empty segments.
fn join_code(segments: &[&str]) -> String {
    segments
        .iter()
        .copied()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
