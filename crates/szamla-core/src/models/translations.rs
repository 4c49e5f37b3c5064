//! Static product/color translation table.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TranslationError;

/// Canonical name and code for one product or color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Canonical display name.
    pub name: String,

    /// Canonical code.
    pub code: String,
}

/// Lookup table mapping free-text product/color names to canonical entries,
/// plus the set of "standard" sizes. Read-only after load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationTable {
    /// Product display name -> canonical entry.
    pub products: HashMap<String, TranslationEntry>,

    /// Color display name -> canonical entry.
    pub colors: HashMap<String, TranslationEntry>,

    /// Sizes considered standard for SKU derivation.
    pub standard_sizes: HashSet<String>,
}

impl TranslationTable {
    /// Load the table from a JSON file.
    ///
    /// A missing file is a hard failure, raised before any invoice row is
    /// translated.
    pub fn load(path: &Path) -> std::result::Result<Self, TranslationError> {
        let data = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                TranslationError::NotFound(path.to_path_buf())
            } else {
                TranslationError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let table: TranslationTable =
            serde_json::from_str(&data).map_err(|e| TranslationError::Invalid {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!(
            "Loaded translation table: {} products, {} colors, {} standard sizes",
            table.products.len(),
            table.colors.len(),
            table.standard_sizes.len()
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_missing_file_is_not_found() {
        let err = TranslationTable::load(Path::new("/nonexistent/translations.json")).unwrap_err();
        assert!(matches!(err, TranslationError::NotFound(_)));
    }

    #[test]
    fn load_parses_expected_shape() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "products": {{"Ablak panel": {{"name": "Panel", "code": "PNL_X1"}}}},
                "colors": {{"fehér": {{"name": "Fehér", "code": "C1"}}}},
                "standard_sizes": ["600x400", "800x400"]
            }}"#
        )
        .unwrap();

        let table = TranslationTable::load(file.path()).unwrap();
        assert_eq!(table.products["Ablak panel"].code, "PNL_X1");
        assert_eq!(table.colors["fehér"].name, "Fehér");
        assert!(table.standard_sizes.contains("800x400"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let table = TranslationTable::load(file.path()).unwrap();
        assert!(table.products.is_empty());
        assert!(table.standard_sizes.is_empty());
    }
}
