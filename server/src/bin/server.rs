//! Fingerprint sheet server binary.
//!
//! Serves the upload form and turns submitted fingerprint scans into a
//! printable PDF.

use tracing_subscriber::EnvFilter;

use fingerprint_sheet::app::SharedState;
use fingerprint_sheet::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting fingerprint sheet server");

    let config = fingerprint_sheet::init_config();
    let state = SharedState::new(config);

    server::start_server(state, shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
