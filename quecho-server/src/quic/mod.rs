//! Single-shot QUIC echo: one connection, one stream.

pub mod listener;
pub mod handler;

#[cfg(test)]
pub(crate) mod test_client;

pub use handler::{accept_stream, echo_stream, EchoOutcome};
pub use listener::EchoServer;
