//! Upload-form web front-end for invoice/order reconciliation.

mod handlers;

use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use tracing::info;

/// Serve the invoice/order comparison as a file-upload form
#[derive(Parser)]
#[command(name = "szamla-web")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Translation table JSON file
    #[arg(long, default_value = "translations.json")]
    translations: PathBuf,
}

/// Shared, request-independent state: only the translation table path.
/// The table itself is loaded fresh per request.
#[derive(Clone)]
pub struct AppState {
    pub translations: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    let state = AppState {
        translations: cli.translations,
    };

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/compare", post(handlers::compare))
        // Uploads are not size-limited; a huge file simply blocks its
        // own request
        .layer(DefaultBodyLimit::disable())
        .with_state(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
