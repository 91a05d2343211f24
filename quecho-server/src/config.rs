use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use quecho_core::constants::{DEFAULT_CERT_PATH, DEFAULT_KEY_PATH, DEFAULT_LISTEN_ADDR};
use quecho_core::error::{QuechoError, Result};

/// Echo server configuration, passed explicitly into the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Local address the QUIC endpoint binds to.
    pub listen_addr: SocketAddr,
    /// PEM certificate chain.
    pub cert_path: PathBuf,
    /// PEM private key.
    pub key_path: PathBuf,
    /// Use a generated self-signed identity instead of the files above.
    pub self_signed: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `QUECHO_LISTEN_ADDR` (optional, default 127.0.0.1:4243)
    /// - `QUECHO_CERT_PATH` (optional, default `../cert/cert.pem` from this crate's source dir)
    /// - `QUECHO_KEY_PATH` (optional, default `../cert/priv.key` from this crate's source dir)
    /// - `QUECHO_SELF_SIGNED` (optional, `1` or `true` to skip the files)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = lookup("QUECHO_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| QuechoError::Config(format!("invalid QUECHO_LISTEN_ADDR: {e}")))?;

        let source_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

        let cert_path = lookup("QUECHO_CERT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| source_dir.join(DEFAULT_CERT_PATH));

        let key_path = lookup("QUECHO_KEY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| source_dir.join(DEFAULT_KEY_PATH));

        let self_signed = lookup("QUECHO_SELF_SIGNED")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            cert_path,
            key_path,
            self_signed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:4243".parse().unwrap());
        assert!(!config.self_signed);
        assert!(config.cert_path.starts_with(env!("CARGO_MANIFEST_DIR")));
        assert!(config.cert_path.ends_with("../cert/cert.pem"));
        assert!(config.key_path.ends_with("../cert/priv.key"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("QUECHO_LISTEN_ADDR", "0.0.0.0:9000"),
            ("QUECHO_CERT_PATH", "/etc/quecho/cert.pem"),
            ("QUECHO_KEY_PATH", "/etc/quecho/key.pem"),
            ("QUECHO_SELF_SIGNED", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.cert_path, PathBuf::from("/etc/quecho/cert.pem"));
        assert_eq!(config.key_path, PathBuf::from("/etc/quecho/key.pem"));
        assert!(config.self_signed);
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = Config::from_lookup(lookup_from(&[("QUECHO_LISTEN_ADDR", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, QuechoError::Config(_)));
    }
}
