use anyhow::{Context, Result};
use clap::Parser;

use pagecast::mime::MimeTable;
use pagecast::server::{router, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "pagecast",
    about = "Serve RSS feeds synthesized from HTML index pages"
)]
struct Args {
    /// IP address or host name to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to listen on
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Full listen address (overrides --host/--port)
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let addr = args
        .addr
        .unwrap_or_else(|| format!("{}:{}", args.host, args.port));

    let state = AppState::new(reqwest::Client::new(), MimeTable::with_media_types());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "pagecast listening");

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
