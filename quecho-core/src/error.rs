use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuechoError {
    #[error("Identity error: {0}")]
    Identity(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Bind error: {0}")]
    Bind(String),

    #[error("Accept error: {0}")]
    Accept(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuechoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_message() {
        let err = QuechoError::Accept("handshake failed".into());
        assert_eq!(err.to_string(), "Accept error: handshake failed");
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(QuechoError::Io(_))));
    }
}
