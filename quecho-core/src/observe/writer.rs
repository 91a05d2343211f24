use std::io;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::ChunkLog;

/// Read buffer size for [`copy_logged`].
const COPY_BUF_SIZE: usize = 8 * 1024;

/// Writer decorator that records each chunk, then forwards it.
///
/// A chunk is recorded once, whole, before any of it reaches the inner
/// writer, so a failed or partial write still shows up in the log.
pub struct LoggingWriter<W> {
    inner: W,
    tag: &'static str,
    log: Arc<dyn ChunkLog>,
}

impl<W> LoggingWriter<W> {
    pub fn new(inner: W, tag: &'static str, log: Arc<dyn ChunkLog>) -> Self {
        Self { inner, tag, log }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the decorator, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: AsyncWrite + Unpin> LoggingWriter<W> {
    /// Record `chunk`, then write all of it to the inner writer.
    pub async fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.log.record(self.tag, chunk);
        self.inner.write_all(chunk).await
    }

    pub async fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().await
    }
}

/// Copy `reader` into `writer` until end-of-stream, one read at a time.
///
/// Every chunk read is recorded as one entry. Returns the number of bytes
/// copied, or the first read or write error.
pub async fn copy_logged<R, W>(reader: &mut R, writer: &mut LoggingWriter<W>) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; COPY_BUF_SIZE];
    let mut copied = 0u64;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            writer.flush().await?;
            return Ok(copied);
        }
        writer.write(&buf[..n]).await?;
        copied += n as u64;
    }
}
