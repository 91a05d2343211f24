/// Address the echo server listens on (address and port in one literal).
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:4243";

/// ALPN identifier presented during the TLS handshake.
pub const ALPN_PROTOCOL_NAME: &str = "echo-quic-demo";
/// [`ALPN_PROTOCOL_NAME`] as wire bytes.
pub const ALPN_PROTOCOL: &[u8] = ALPN_PROTOCOL_NAME.as_bytes();

/// SNI name the client uses when none is given.
pub const DEFAULT_SERVER_NAME: &str = "localhost";

/// Side tag attached to chunks the server echoes.
pub const SERVER_TAG: &str = "Server";
/// Side tag attached to chunks the client receives.
pub const CLIENT_TAG: &str = "Client";

/// Certificate path suffix, relative to the server crate's source directory.
pub const DEFAULT_CERT_PATH: &str = "../cert/cert.pem";
/// Private key path suffix, relative to the server crate's source directory.
pub const DEFAULT_KEY_PATH: &str = "../cert/priv.key";

/// Upper bound on the echo the client reads back: 64 MB.
pub const MAX_ECHO_READ: usize = 64 * 1024 * 1024;
