//! Wire-byte accounting.
//!
//! Measures what each join strategy actually puts on the channel, in the
//! same encoding the channel uses, so the filter-versus-classic comparison
//! is apples to apples.

use serde::Serialize;

/// Bytes one join attempt shipped across the channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferStats {
    /// Coefficient pairs sent to the peer.
    pub coefficient_bytes: u64,
    /// Bit vector sent to the peer.
    pub vector_bytes: u64,
    /// Rows shipped back (candidates, or the full classic row set).
    pub row_bytes: u64,
}

impl TransferStats {
    /// Total bytes on the wire for this attempt.
    pub fn total(&self) -> u64 {
        self.coefficient_bytes + self.vector_bytes + self.row_bytes
    }
}

/// Encoded size of a value in the channel's wire encoding.
pub fn wire_size<T: Serialize>(value: &T) -> u64 {
    bincode::serialized_size(value).unwrap_or(0)
}
