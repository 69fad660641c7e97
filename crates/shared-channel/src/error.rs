//! Transport error taxonomy.

use thiserror::Error;

/// Errors crossing the request/response channel.
///
/// Any of these aborts the enclosing join attempt; the channel never retries.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("link closed: peer endpoint dropped")]
    Closed,

    #[error("frame version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u16, actual: u16 },

    #[error("frame encode failed: {0}")]
    Encode(String),

    #[error("frame decode failed: {0}")]
    Decode(String),
}
