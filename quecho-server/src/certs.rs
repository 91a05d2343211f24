//! TLS identity for the QUIC endpoint.
//!
//! The server normally reads a PEM certificate chain and private key from
//! disk. A generated self-signed identity is available for development.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quecho_core::error::{QuechoError, Result};
use rcgen::generate_simple_self_signed;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};

/// Certificate chain and private key, loaded once at startup.
pub struct Identity {
    pub certs: Vec<CertificateDer<'static>>,
    pub key: PrivateKeyDer<'static>,
}

/// Load a PEM certificate chain and PEM private key from disk.
pub fn load_identity(cert_path: &Path, key_path: &Path) -> Result<Identity> {
    let cert_file = File::open(cert_path).map_err(|e| {
        QuechoError::Identity(format!("cannot open certificate {}: {e}", cert_path.display()))
    })?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(cert_file))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            QuechoError::Identity(format!("invalid certificate {}: {e}", cert_path.display()))
        })?;
    if certs.is_empty() {
        return Err(QuechoError::Identity(format!(
            "no certificate found in {}",
            cert_path.display()
        )));
    }

    let key_file = File::open(key_path).map_err(|e| {
        QuechoError::Identity(format!("cannot open private key {}: {e}", key_path.display()))
    })?;
    let key = rustls_pemfile::private_key(&mut BufReader::new(key_file))
        .map_err(|e| {
            QuechoError::Identity(format!("invalid private key {}: {e}", key_path.display()))
        })?
        .ok_or_else(|| {
            QuechoError::Identity(format!("no private key found in {}", key_path.display()))
        })?;

    Ok(Identity { certs, key })
}

/// Generate a self-signed certificate valid for "localhost" and "127.0.0.1".
pub fn generate_self_signed_cert() -> Result<Identity> {
    let subject_alt_names = vec!["localhost".to_string(), "127.0.0.1".to_string()];
    let cert = generate_simple_self_signed(subject_alt_names)
        .map_err(|e| QuechoError::Identity(format!("failed to generate cert: {e}")))?;

    let cert_der = CertificateDer::from(cert.cert);
    let key_der = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der()));

    Ok(Identity {
        certs: vec![cert_der],
        key: key_der,
    })
}
