use std::io;
use std::sync::Arc;

use quinn::{Connection, RecvStream, SendStream, VarInt};

use quecho_core::constants::SERVER_TAG;
use quecho_core::error::{QuechoError, Result};
use quecho_core::observe::{copy_logged, ChunkLog, LoggingWriter};

/// How the echo of one stream ended.
#[derive(Debug)]
pub struct EchoOutcome {
    /// Transport-assigned stream identifier.
    pub stream_id: u64,
    /// Bytes echoed on clean end-of-stream, or the error that stopped the copy.
    pub result: io::Result<u64>,
}

/// Wait for the first bi-directional stream on `connection`. No deadline.
pub async fn accept_stream(connection: &Connection) -> Result<(SendStream, RecvStream)> {
    let (send, recv) = connection
        .accept_bi()
        .await
        .map_err(|e| QuechoError::Accept(format!("stream accept error: {e}")))?;

    tracing::info!(stream_id = stream_id(&send), "Create a new stream");
    Ok((send, recv))
}

/// Copy everything read from `recv` back into `send`, recording each chunk
/// before it is written back.
///
/// Copy errors (peer reset, connection lost) end the echo and are returned
/// in the outcome; they are not setup failures. On clean end-of-stream the
/// send half is finished and this waits until the peer has received it.
pub async fn echo_stream(
    send: SendStream,
    mut recv: RecvStream,
    log: Arc<dyn ChunkLog>,
) -> EchoOutcome {
    let stream_id = stream_id(&send);
    let mut writer = LoggingWriter::new(send, SERVER_TAG, log);

    let result = copy_logged(&mut recv, &mut writer).await;

    let mut send = writer.into_inner();
    if result.is_ok() {
        if let Err(e) = send.finish() {
            tracing::debug!(stream_id, error = %e, "finish stream failed");
        }
        if let Err(e) = send.stopped().await {
            tracing::debug!(stream_id, error = %e, "peer did not acknowledge echo");
        }
    }

    EchoOutcome { stream_id, result }
}

fn stream_id(send: &SendStream) -> u64 {
    VarInt::from(send.id()).into_inner()
}
