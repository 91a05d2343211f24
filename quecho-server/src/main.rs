mod certs;
mod config;
mod quic;
mod service;

use std::fmt::Display;
use std::sync::Arc;

use quecho_core::observe::TracingChunkLog;
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quecho_server=info,quecho_core=info")),
        )
        .init();

    // Install the ring crypto provider for rustls before any TLS operations.
    if !install_crypto_provider() {
        tracing::warn!("a rustls crypto provider was already installed; keeping it");
    }

    // Load .env file if present (non-fatal if missing).
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    let config = Config::from_env().unwrap_or_else(|e| fatal("invalid configuration", e));

    let server = service::prepare(&config).unwrap_or_else(|e| fatal("failed to start echo service", e));

    match server.local_addr() {
        Ok(addr) => tracing::info!(%addr, "Quic server is running, it will exit after a stream is done"),
        Err(e) => tracing::warn!(error = %e, "Quic server is running on an unknown address"),
    }

    let outcome = service::serve(server, Arc::new(TracingChunkLog))
        .await
        .unwrap_or_else(|e| fatal("echo service failed", e));

    // Last line of the run, clean close or not.
    match &outcome.result {
        Ok(bytes) => tracing::info!(stream_id = outcome.stream_id, bytes, "stream {} is closed", outcome.stream_id),
        Err(e) => tracing::info!(stream_id = outcome.stream_id, error = %e, "stream {} is closed", outcome.stream_id),
    }
}

/// Install ring as the process-wide rustls provider. Returns false if a
/// provider was already installed.
fn install_crypto_provider() -> bool {
    rustls::crypto::ring::default_provider().install_default().is_ok()
}

/// Log a setup failure and exit with a non-zero status.
fn fatal(context: &str, err: impl Display) -> ! {
    tracing::error!(error = %err, "{context}");
    std::process::exit(1);
}
