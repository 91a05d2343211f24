use std::net::SocketAddr;
use std::sync::Arc;

use quinn::{Connection, Endpoint, ServerConfig as QuinnServerConfig, VarInt};
use rustls::ServerConfig as RustlsServerConfig;

use quecho_core::constants::ALPN_PROTOCOL;
use quecho_core::error::{QuechoError, Result};

use crate::certs::Identity;

/// QUIC endpoint that serves a single echo connection.
pub struct EchoServer {
    endpoint: Endpoint,
}

impl EchoServer {
    /// Bind a QUIC endpoint on `addr`, presenting `identity` and the echo ALPN.
    pub fn bind(addr: SocketAddr, identity: Identity) -> Result<Self> {
        let mut rustls_config = RustlsServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(identity.certs, identity.key)
            .map_err(|e| QuechoError::Tls(format!("TLS config error: {e}")))?;

        // Clients offering any other protocol fail the handshake.
        rustls_config.alpn_protocols = vec![ALPN_PROTOCOL.to_vec()];

        let quinn_config = QuinnServerConfig::with_crypto(Arc::new(
            quinn::crypto::rustls::QuicServerConfig::try_from(rustls_config)
                .map_err(|e| QuechoError::Tls(format!("QUIC crypto config error: {e}")))?,
        ));

        let endpoint = Endpoint::server(quinn_config, addr)
            .map_err(|e| QuechoError::Bind(format!("QUIC endpoint bind error on {addr}: {e}")))?;

        Ok(Self { endpoint })
    }

    /// Address the endpoint is actually bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.endpoint.local_addr()?)
    }

    /// Wait for the first incoming connection and complete its handshake.
    ///
    /// There is no deadline. Later connection attempts are never accepted.
    pub async fn accept_connection(&self) -> Result<Connection> {
        let incoming = self
            .endpoint
            .accept()
            .await
            .ok_or_else(|| QuechoError::Accept("endpoint closed before a connection arrived".into()))?;

        let connecting = incoming
            .accept()
            .map_err(|e| QuechoError::Accept(format!("failed to accept incoming connection: {e}")))?;

        let connection = connecting
            .await
            .map_err(|e| QuechoError::Accept(format!("QUIC handshake failed: {e}")))?;

        tracing::info!(remote = %connection.remote_address(), "Connection is established");
        Ok(connection)
    }

    /// Close `connection` and wait until the endpoint has flushed everything.
    pub async fn shutdown(self, connection: Connection) {
        connection.close(VarInt::from_u32(0), b"echo done");
        self.endpoint.wait_idle().await;
    }
}
