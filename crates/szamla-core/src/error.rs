//! Error types for the szamla-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the szamla library.
#[derive(Error, Debug)]
pub enum SzamlaError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Translation table error.
    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Order file error.
    #[error("order file error: {0}")]
    Order(#[from] OrderError),

    /// Report writing error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the translation table file.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The translation file does not exist.
    #[error("translation file not found: {0}")]
    NotFound(PathBuf),

    /// The translation file could not be read.
    #[error("failed to read translation file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The translation file is not valid JSON of the expected shape.
    #[error("invalid translation file {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors related to reading order and invoice files.
#[derive(Error, Debug)]
pub enum OrderError {
    /// Failed to read a spreadsheet container.
    #[error("failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    /// Failed to parse delimited text.
    #[error("failed to parse delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to writing xlsx reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The xlsx writer rejected the workbook.
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error while writing the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the szamla library.
pub type Result<T> = std::result::Result<T, SzamlaError>;
