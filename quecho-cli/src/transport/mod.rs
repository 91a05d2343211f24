//! Network transport: QUIC echo client (`quinn`).

pub mod quic;

pub use quic::{EchoClient, Trust};
