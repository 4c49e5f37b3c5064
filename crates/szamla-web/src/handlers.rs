//! HTTP handlers: the upload form and the compare endpoint.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use szamla_core::pdf::PdfProcessor;
use szamla_core::{
    apply_translations, compare_invoice_rows, compare_order_rows, normalize_text,
    read_order_rows_from_bytes, report_bytes, scan_rows, InvoiceTable, PdfExtractor,
    TranslationTable,
};

use crate::AppState;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Render the upload form.
pub async fn index() -> Html<String> {
    Html(render_form(None))
}

/// Accept the uploaded invoice PDF and order file, run both comparison
/// passes and answer with the colored report as a download. Any user-level
/// problem re-renders the form with an inline error at HTTP 200.
pub async fn compare(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut invoice_bytes: Option<Vec<u8>> = None;
    let mut order_bytes: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().map(str::to_string);
                let data = match field.bytes().await {
                    Ok(data) => data.to_vec(),
                    Err(e) => {
                        warn!("Failed to read multipart field: {}", e);
                        return form_error("Failed to read the uploaded files.");
                    }
                };
                match name.as_deref() {
                    Some("invoice_pdf") => invoice_bytes = Some(data),
                    Some("order_file") => order_bytes = Some(data),
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Malformed multipart request: {}", e);
                return form_error("Failed to read the uploaded files.");
            }
        }
    }

    // An empty part is what browsers send when no file was chosen
    let (Some(invoice), Some(order)) = (
        invoice_bytes.filter(|b| !b.is_empty()),
        order_bytes.filter(|b| !b.is_empty()),
    ) else {
        return form_error("Please upload both the invoice PDF and the order file.");
    };

    match run_compare(&state, &invoice, &order) {
        Ok(bytes) => {
            info!("Comparison succeeded, report is {} bytes", bytes.len());
            (
                [
                    (header::CONTENT_TYPE, XLSX_MIME),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"compare-output.xlsx\"",
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            warn!("Comparison failed: {}", e);
            form_error(&e.to_string())
        }
    }
}

fn run_compare(state: &AppState, invoice_pdf: &[u8], order_file: &[u8]) -> anyhow::Result<Vec<u8>> {
    let order_rows = read_order_rows_from_bytes(order_file)?;
    if order_rows.is_empty() {
        anyhow::bail!("No rows found in the uploaded order file.");
    }

    let mut extractor = PdfExtractor::new();
    extractor.load(invoice_pdf)?;
    let text = normalize_text(&extractor.extract_text()?);

    // Loaded fresh per request; read-only afterwards
    let table = TranslationTable::load(&state.translations)?;
    let rows = apply_translations(scan_rows(&text).collect(), &table);

    let invoice = InvoiceTable::from_parsed_rows(&rows);
    let sheets = [
        compare_order_rows(&order_rows, &invoice),
        compare_invoice_rows(&order_rows, &invoice),
    ];

    Ok(report_bytes(&sheets)?)
}

fn form_error(message: &str) -> Response {
    Html(render_form(Some(message))).into_response()
}

fn render_form(error: Option<&str>) -> String {
    let error_block = match error {
        Some(message) => format!(
            "<p class=\"error\">{}</p>",
            html_escape(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Invoice comparison</title>
<style>
body {{ font-family: sans-serif; max-width: 40em; margin: 3em auto; }}
label {{ display: block; margin-top: 1em; }}
.error {{ color: #b00020; }}
button {{ margin-top: 1.5em; }}
</style>
</head>
<body>
<h1>Invoice comparison</h1>
<p>Upload the vendor invoice PDF and the order file (CSV or Excel) to
download the colored comparison report.</p>
{error_block}
<form action="/compare" method="post" enctype="multipart/form-data">
<label>Invoice PDF
<input type="file" name="invoice_pdf" accept=".pdf">
</label>
<label>Order file
<input type="file" name="order_file" accept=".csv,.xlsx,.xlsm,.txt">
</label>
<button type="submit">Compare</button>
</form>
</body>
</html>
"#
    )
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_renders_without_error_block() {
        let html = render_form(None);
        assert!(html.contains("multipart/form-data"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn form_renders_escaped_error() {
        let html = render_form(Some("bad <input>"));
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("bad &lt;input&gt;"));
    }
}
