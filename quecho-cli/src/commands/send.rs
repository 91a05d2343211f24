use quecho_core::constants::CLIENT_TAG;
use quecho_core::error::QuechoError;

use crate::transport::{EchoClient, Trust};

/// Send `messages` on one stream and print what the server echoed back.
pub async fn run_send(
    server: &str,
    server_name: &str,
    alpn: &str,
    trust: &Trust,
    messages: &[String],
) -> Result<(), QuechoError> {
    if messages.is_empty() {
        return Err(QuechoError::Config("nothing to send".into()));
    }

    let client = EchoClient::connect(server, server_name, alpn.as_bytes(), trust).await?;
    let echoed = client.echo(messages).await;
    client.close().await;
    let echoed = echoed?;

    let sent: usize = messages.iter().map(String::len).sum();
    println!("{CLIENT_TAG}: Got '{}'", String::from_utf8_lossy(&echoed));
    if echoed.len() != sent {
        tracing::warn!(sent, received = echoed.len(), "echo length differs from what was sent");
    }

    Ok(())
}
