//! Invoice text processing: normalization, row scanning, code derivation.

pub mod amounts;
pub mod normalize;
pub mod patterns;
pub mod scanner;
pub mod translate;

pub use amounts::{format_currency, parse_locale_decimal};
pub use normalize::normalize_text;
pub use scanner::{scan_rows, RowScanner};
pub use translate::{apply_translations, translate_row};
