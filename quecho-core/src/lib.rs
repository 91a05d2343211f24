//! Shared pieces of the quecho QUIC echo demo.
//!
//! The server and the CLI agree on the listen address and ALPN identifier
//! defined here, and both report failures through [`error::QuechoError`].

pub mod error;
pub mod constants;
pub mod observe;
