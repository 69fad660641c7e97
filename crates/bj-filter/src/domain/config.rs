//! Filter sizing configuration and validation.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Largest bit vector a node will configure. Caps what a peer can make us
/// allocate through the wire contract.
pub const MAX_SLOT_COUNT: usize = 1 << 26;

/// Largest usable hash function count. Past this the vector saturates long
/// before the extra hashing buys anything.
pub const MAX_HASH_COUNT: usize = 64;

/// The two tuning parameters of a membership filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Bit vector length (m).
    pub slot_count: usize,
    /// Number of hash functions (k).
    pub hash_count: usize,
}

impl FilterConfig {
    /// Create a validated configuration.
    pub fn new(slot_count: usize, hash_count: usize) -> Result<Self, FilterError> {
        let config = Self {
            slot_count,
            hash_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the sizing.
    ///
    /// A zero hash count is rejected here as a sizing error: the resulting
    /// filter would answer true for every key, which reads as "everything
    /// matches" rather than as a summary.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.slot_count == 0 {
            return Err(FilterError::InvalidSlotCount);
        }
        if self.hash_count == 0 {
            return Err(FilterError::InvalidHashCount);
        }
        if self.slot_count > MAX_SLOT_COUNT {
            return Err(FilterError::SlotCountTooLarge {
                count: self.slot_count,
                max: MAX_SLOT_COUNT,
            });
        }
        if self.hash_count > MAX_HASH_COUNT {
            return Err(FilterError::HashCountTooLarge {
                count: self.hash_count,
                max: MAX_HASH_COUNT,
            });
        }
        Ok(())
    }
}
