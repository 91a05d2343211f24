//! Chunk observation: a logging decorator around async writers.

pub mod chunk_log;
pub mod writer;

pub use chunk_log::{ChunkLog, TracingChunkLog};
#[cfg(any(test, feature = "test-util"))]
pub use chunk_log::MemoryChunkLog;
pub use writer::{copy_logged, LoggingWriter};
