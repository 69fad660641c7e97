//! Error types for filter configuration and exchange.

use thiserror::Error;

/// Errors raised while sizing, binding, or exchanging a membership filter.
///
/// All of these are configuration failures: they fire before any bit of
/// filter state is mutated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("slot count must be positive")]
    InvalidSlotCount,

    #[error("hash count must be positive")]
    InvalidHashCount,

    #[error("slot count exceeds maximum: {count} > {max}")]
    SlotCountTooLarge { count: usize, max: usize },

    #[error("hash count exceeds maximum: {count} > {max}")]
    HashCountTooLarge { count: usize, max: usize },

    #[error("hash function list length {actual} does not match configured hash count {expected}")]
    HashCountMismatch { expected: usize, actual: usize },

    #[error("hash function addresses {actual} slots but the filter has {expected}")]
    SlotCountMismatch { expected: usize, actual: usize },

    #[error("received bit vector has {actual} bits but the filter has {expected} slots")]
    VectorLengthMismatch { expected: usize, actual: usize },
}
