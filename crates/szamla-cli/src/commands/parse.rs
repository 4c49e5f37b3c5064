//! Parse command - extract invoice rows from a PDF and stream CSV to stdout.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use szamla_core::pdf::PdfProcessor;
use szamla_core::{
    apply_translations, normalize_text, scan_rows, ParsedRow, PdfExtractor, TranslationTable,
    FIELDNAMES,
};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Invoice PDF to parse
    #[arg(required = true)]
    pdf_path: PathBuf,

    /// Print the raw extracted text instead of parsed rows
    #[arg(long)]
    raw: bool,

    /// Output CSV delimiter
    #[arg(long, default_value = ";")]
    delimiter: char,

    /// Translation table JSON file
    #[arg(long, default_value = "translations.json")]
    translations: PathBuf,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    if !args.pdf_path.exists() {
        anyhow::bail!("PDF not found: {}", args.pdf_path.display());
    }
    let delimiter =
        u8::try_from(args.delimiter).context("delimiter must be a single ASCII character")?;

    if args.raw {
        let text = extract_normalized_text(&args.pdf_path)?;
        return print_text(&text);
    }

    // The translation table is required before any row is processed
    let table = TranslationTable::load(&args.translations)?;

    let text = extract_normalized_text(&args.pdf_path)?;
    let rows = apply_translations(scan_rows(&text).collect(), &table);
    info!("Parsed {} invoice rows", rows.len());

    match write_csv(&rows, delimiter) {
        // A closed output pipe (e.g. `szamla parse x.pdf | head`) is a
        // clean termination, not an error
        Err(e) if is_broken_pipe(&e) => Ok(()),
        other => other.map_err(Into::into),
    }
}

fn extract_normalized_text(path: &Path) -> anyhow::Result<String> {
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    Ok(normalize_text(&extractor.extract_text()?))
}

fn write_csv(rows: &[ParsedRow], delimiter: u8) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(io::stdout().lock());

    writer.write_record(FIELDNAMES)?;
    for row in rows {
        writer.write_record(row.csv_record())?;
    }
    writer.flush()?;
    Ok(())
}

fn print_text(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    match writeln!(stdout, "{}", text) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(Into::into),
    }
}

fn is_broken_pipe(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(io_err) if io_err.kind() == ErrorKind::BrokenPipe)
}
