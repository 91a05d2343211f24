#[cfg(any(test, feature = "test-util"))]
use std::sync::Mutex;

/// Sink for chunks passing through a [`LoggingWriter`](super::LoggingWriter).
///
/// `tag` names the side that handled the chunk (`"Server"` or `"Client"`).
pub trait ChunkLog: Send + Sync {
    fn record(&self, tag: &str, chunk: &[u8]);
}

/// Emits one `tracing` event per chunk, rendering the bytes as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingChunkLog;

impl ChunkLog for TracingChunkLog {
    fn record(&self, tag: &str, chunk: &[u8]) {
        tracing::info!(side = tag, len = chunk.len(), "Got '{}'", String::from_utf8_lossy(chunk));
    }
}

/// Keeps every recorded chunk in memory, in arrival order.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct MemoryChunkLog {
    chunks: Mutex<Vec<(String, Vec<u8>)>>,
}

#[cfg(any(test, feature = "test-util"))]
impl MemoryChunkLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(tag, chunk)` pairs recorded so far.
    pub fn chunks(&self) -> Vec<(String, Vec<u8>)> {
        self.chunks
            .lock()
            .map(|chunks| chunks.clone())
            .unwrap_or_default()
    }

    /// All recorded bytes concatenated in arrival order.
    pub fn concatenated(&self) -> Vec<u8> {
        self.chunks()
            .into_iter()
            .flat_map(|(_, chunk)| chunk)
            .collect()
    }
}

#[cfg(any(test, feature = "test-util"))]
impl ChunkLog for MemoryChunkLog {
    fn record(&self, tag: &str, chunk: &[u8]) {
        if let Ok(mut chunks) = self.chunks.lock() {
            chunks.push((tag.to_string(), chunk.to_vec()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_log_keeps_order() {
        let log = MemoryChunkLog::new();
        log.record("Server", b"hello");
        log.record("Server", b"world");

        let chunks = log.chunks();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], ("Server".to_string(), b"hello".to_vec()));
        assert_eq!(log.concatenated(), b"helloworld");
    }

    #[test]
    fn test_tracing_log_accepts_non_utf8() {
        TracingChunkLog.record("Server", &[0xff, 0xfe, b'a']);
    }
}
