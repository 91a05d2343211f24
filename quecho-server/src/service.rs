//! The echo service: identity, listener, one connection, one stream.

use std::sync::Arc;

use quecho_core::error::Result;
use quecho_core::observe::ChunkLog;

use crate::certs;
use crate::config::Config;
use crate::quic::{accept_stream, echo_stream, EchoOutcome, EchoServer};

/// Load the TLS identity, then bind the listener.
///
/// The identity is loaded first, so an identity failure never opens a socket.
pub fn prepare(config: &Config) -> Result<EchoServer> {
    let identity = if config.self_signed {
        certs::generate_self_signed_cert()?
    } else {
        certs::load_identity(&config.cert_path, &config.key_path)?
    };

    EchoServer::bind(config.listen_addr, identity)
}

/// Serve exactly one stream on exactly one connection, then shut down.
///
/// Connection and stream accept failures are returned. How the echo itself
/// ended is reported in the outcome.
pub async fn serve(server: EchoServer, log: Arc<dyn ChunkLog>) -> Result<EchoOutcome> {
    let connection = server.accept_connection().await?;
    let (send, recv) = accept_stream(&connection).await?;

    let outcome = echo_stream(send, recv, log).await;
    server.shutdown(connection).await;

    Ok(outcome)
}
