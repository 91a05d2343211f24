mod commands;
mod transport;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quecho_core::constants::{ALPN_PROTOCOL_NAME, DEFAULT_LISTEN_ADDR, DEFAULT_SERVER_NAME};
use transport::Trust;

#[derive(Parser)]
#[command(name = "quecho", about = "Client for the single-shot QUIC echo server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send messages on one stream and print the echo
    Send {
        /// Messages, written to the stream in order
        messages: Vec<String>,

        /// Server address (host:port)
        #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
        server: String,

        /// TLS server name to present and verify
        #[arg(long, default_value = DEFAULT_SERVER_NAME)]
        server_name: String,

        /// PEM file with the certificate to trust. Without it, any certificate is accepted.
        #[arg(long)]
        ca: Option<PathBuf>,

        /// ALPN identifier to offer
        #[arg(long, default_value = ALPN_PROTOCOL_NAME)]
        alpn: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing (controlled by RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quecho=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Send {
            messages,
            server,
            server_name,
            ca,
            alpn,
        } => {
            let trust = ca.map(Trust::Ca).unwrap_or(Trust::Insecure);
            commands::send::run_send(&server, &server_name, &alpn, &trust, &messages).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_defaults() {
        let cli = Cli::try_parse_from(["quecho", "send", "hello", "world"]).unwrap();
        let Commands::Send { messages, server, server_name, ca, alpn } = cli.command;
        assert_eq!(messages, vec!["hello", "world"]);
        assert_eq!(server, "127.0.0.1:4243");
        assert_eq!(server_name, "localhost");
        assert!(ca.is_none());
        assert_eq!(alpn, "echo-quic-demo");
    }

    #[test]
    fn test_send_overrides() {
        let cli = Cli::try_parse_from([
            "quecho", "send", "--server", "10.0.0.1:9000", "--ca", "cert.pem", "--alpn", "other", "x",
        ])
        .unwrap();
        let Commands::Send { server, ca, alpn, .. } = cli.command;
        assert_eq!(server, "10.0.0.1:9000");
        assert_eq!(ca, Some(PathBuf::from("cert.pem")));
        assert_eq!(alpn, "other");
    }
}
