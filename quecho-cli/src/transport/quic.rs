use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quinn::{ClientConfig, Connection, Endpoint, VarInt};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tracing::{debug, info};

use quecho_core::constants::MAX_ECHO_READ;
use quecho_core::error::{QuechoError, Result};

/// How the client decides whether to trust the server certificate.
#[derive(Debug, Clone)]
pub enum Trust {
    /// Accept any certificate. Development only.
    Insecure,
    /// Trust only the certificates in this PEM file.
    Ca(PathBuf),
}

/// QUIC client that sends messages on one stream and reads the echo back.
pub struct EchoClient {
    endpoint: Endpoint,
    connection: Connection,
}

impl EchoClient {
    /// Connect to an echo server at `host:port`, offering `alpn`.
    pub async fn connect(
        server_addr: &str,
        server_name: &str,
        alpn: &[u8],
        trust: &Trust,
    ) -> Result<Self> {
        // Install the ring crypto provider for rustls (idempotent).
        let _ = rustls::crypto::ring::default_provider().install_default();

        let addr = server_addr
            .parse::<SocketAddr>()
            .map_err(|e| QuechoError::Config(format!("invalid server address: {e}")))?;

        let builder = rustls::ClientConfig::builder();
        let mut crypto = match trust {
            Trust::Insecure => builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(SkipServerVerification))
                .with_no_client_auth(),
            Trust::Ca(path) => builder
                .with_root_certificates(load_roots(path)?)
                .with_no_client_auth(),
        };

        // Must match the server's ALPN protocol.
        crypto.alpn_protocols = vec![alpn.to_vec()];

        let client_config = ClientConfig::new(Arc::new(
            quinn::crypto::rustls::QuicClientConfig::try_from(crypto)
                .map_err(|e| QuechoError::Tls(format!("quinn crypto config error: {e}")))?,
        ));

        let mut endpoint = Endpoint::client("0.0.0.0:0".parse::<SocketAddr>().map_err(|e| {
            QuechoError::Transport(format!("bind address error: {e}"))
        })?)
        .map_err(|e| QuechoError::Transport(format!("endpoint creation failed: {e}")))?;

        endpoint.set_default_client_config(client_config);

        info!("Connecting to QUIC server at {server_addr}");

        let connection = endpoint
            .connect(addr, server_name)
            .map_err(|e| QuechoError::Transport(format!("QUIC connect error: {e}")))?
            .await
            .map_err(|e| QuechoError::Transport(format!("QUIC connection failed: {e}")))?;

        info!("QUIC connection established");

        Ok(Self { endpoint, connection })
    }

    /// Write each message in order on a new stream, finish it, and return the echo.
    pub async fn echo(&self, messages: &[String]) -> Result<Vec<u8>> {
        let (mut send, mut recv) = self
            .connection
            .open_bi()
            .await
            .map_err(|e| QuechoError::Transport(format!("open stream failed: {e}")))?;

        for message in messages {
            send.write_all(message.as_bytes())
                .await
                .map_err(|e| QuechoError::Transport(format!("write failed: {e}")))?;
            debug!("Sent {} bytes", message.len());
        }

        send.finish()
            .map_err(|e| QuechoError::Transport(format!("finish send failed: {e}")))?;

        let echoed = recv
            .read_to_end(MAX_ECHO_READ)
            .await
            .map_err(|e| QuechoError::Transport(format!("read failed: {e}")))?;

        debug!("Received {} bytes", echoed.len());
        Ok(echoed)
    }

    /// Close the connection and wait for the endpoint to drain.
    pub async fn close(self) {
        self.connection.close(VarInt::from_u32(0), b"done");
        self.endpoint.wait_idle().await;
    }
}

/// Read every PEM certificate in `path` into a root store.
fn load_roots(path: &Path) -> Result<rustls::RootCertStore> {
    let file = File::open(path).map_err(|e| {
        QuechoError::Identity(format!("cannot open CA file {}: {e}", path.display()))
    })?;

    let mut roots = rustls::RootCertStore::empty();
    for cert in rustls_pemfile::certs(&mut BufReader::new(file)) {
        let cert = cert.map_err(|e| {
            QuechoError::Identity(format!("invalid certificate in {}: {e}", path.display()))
        })?;
        roots
            .add(cert)
            .map_err(|e| QuechoError::Tls(format!("rejected trust root: {e}")))?;
    }

    if roots.is_empty() {
        return Err(QuechoError::Identity(format!(
            "no certificate found in {}",
            path.display()
        )));
    }
    Ok(roots)
}

/// A rustls certificate verifier that accepts any server certificate.
/// Used for development with self-signed certificates.
#[derive(Debug)]
struct SkipServerVerification;

impl rustls::client::danger::ServerCertVerifier for SkipServerVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        rustls::crypto::ring::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}
