//! Minimal quinn client for in-process tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quinn::{Connection, Endpoint, IdleTimeout, TransportConfig};
use rustls::pki_types::CertificateDer;

pub fn install_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Connect to `addr` trusting only `trust`, offering `alpn`.
///
/// The client gives up after two idle seconds, so a handshake the server
/// never completes fails instead of hanging the test.
pub async fn connect(
    addr: SocketAddr,
    alpn: &[u8],
    trust: CertificateDer<'static>,
) -> Result<(Endpoint, Connection), String> {
    install_provider();

    let mut roots = rustls::RootCertStore::empty();
    roots.add(trust).map_err(|e| e.to_string())?;

    let mut crypto = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    crypto.alpn_protocols = vec![alpn.to_vec()];

    let mut transport = TransportConfig::default();
    transport.max_idle_timeout(Some(
        IdleTimeout::try_from(Duration::from_secs(2)).map_err(|e| e.to_string())?,
    ));

    let mut client_config = quinn::ClientConfig::new(Arc::new(
        quinn::crypto::rustls::QuicClientConfig::try_from(crypto).map_err(|e| e.to_string())?,
    ));
    client_config.transport_config(Arc::new(transport));

    let local: SocketAddr = "127.0.0.1:0".parse().map_err(|e| format!("{e}"))?;
    let mut endpoint = Endpoint::client(local).map_err(|e| e.to_string())?;
    endpoint.set_default_client_config(client_config);

    let connection = endpoint
        .connect(addr, "localhost")
        .map_err(|e| e.to_string())?
        .await
        .map_err(|e| e.to_string())?;

    Ok((endpoint, connection))
}
