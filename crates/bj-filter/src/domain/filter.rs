//! Core membership filter.
//!
//! State is `{ slot count m, ordered list of k hash functions, bit vector of
//! length m }`. A filter is compatible with a peer's filter only if m, k, and
//! every coefficient pair match exactly; a coefficient mismatch produces
//! meaningless membership answers with no structural error signal, which is
//! why the binding step takes transmitted coefficients rather than drawing.
//!
//! A filter lives for one join attempt: configure, bind, add burst, export
//! (or load), discard. Stale bits from a previous population silently corrupt
//! later checks, so there is no reuse path other than a full reset.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use shared_types::JoinKey;

use super::hash_family::UniversalHash;
use crate::error::FilterError;

/// The bit vector as it travels on the wire: raw bytes plus the exact bit
/// length, so a vector for 100 slots is distinguishable from one for 104.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterVector {
    bytes: Vec<u8>,
    bit_len: u64,
}

impl FilterVector {
    /// Number of bits carried.
    pub fn len(&self) -> usize {
        self.bit_len as usize
    }

    /// True when the vector carries zero bits.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    fn from_bits(bits: &BitVec<u8, Lsb0>) -> Self {
        Self {
            bytes: bits.as_raw_slice().to_vec(),
            bit_len: bits.len() as u64,
        }
    }

    fn to_bits(&self) -> BitVec<u8, Lsb0> {
        let mut bits = BitVec::<u8, Lsb0>::from_vec(self.bytes.clone());
        bits.truncate(self.bit_len as usize);
        bits
    }
}

/// Probabilistic membership summary of a key set.
///
/// Guarantee: once populated, `check(x)` returns true for every added `x`,
/// never a false negative. A key that was never added passes only as a false
/// positive, with probability approaching `(1 - e^(-kn/m))^k` after n adds.
#[derive(Clone, Debug)]
pub struct MembershipFilter {
    /// Bit vector length (m).
    slot_count: usize,
    /// Number of hash functions this filter is sized for (k).
    hash_count: usize,
    /// Bound hash functions; empty until [`bind_hash_functions`] succeeds.
    ///
    /// [`bind_hash_functions`]: MembershipFilter::bind_hash_functions
    hashes: Vec<UniversalHash>,
    /// Bit array storing the filter state.
    bits: BitVec<u8, Lsb0>,
}

impl MembershipFilter {
    /// Create an empty filter sized for `slot_count` bits and `hash_count`
    /// hash functions. No hash functions are bound yet.
    ///
    /// Fails unless both arguments are positive: a zero-hash filter answers
    /// true for every key and is a sizing error, not a summary.
    pub fn new(slot_count: usize, hash_count: usize) -> Result<Self, FilterError> {
        if slot_count == 0 {
            return Err(FilterError::InvalidSlotCount);
        }
        if hash_count == 0 {
            return Err(FilterError::InvalidHashCount);
        }
        Ok(Self {
            slot_count,
            hash_count,
            hashes: Vec::new(),
            bits: bitvec![u8, Lsb0; 0; slot_count],
        })
    }

    /// Replace the bound hash function list.
    ///
    /// The list length must equal the configured hash count and every
    /// function must address this filter's slot count.
    pub fn bind_hash_functions(&mut self, hashes: Vec<UniversalHash>) -> Result<(), FilterError> {
        if hashes.len() != self.hash_count {
            return Err(FilterError::HashCountMismatch {
                expected: self.hash_count,
                actual: hashes.len(),
            });
        }
        if let Some(h) = hashes.iter().find(|h| h.slot_count() != self.slot_count) {
            return Err(FilterError::SlotCountMismatch {
                expected: self.slot_count,
                actual: h.slot_count(),
            });
        }
        self.hashes = hashes;
        Ok(())
    }

    /// Add a key: sets `slot(key)` for every bound hash function.
    pub fn add(&mut self, key: JoinKey) {
        for hash in &self.hashes {
            self.bits.set(hash.slot(key), true);
        }
    }

    /// Membership test: true iff every bound hash function's slot is set.
    ///
    /// With no hash functions bound this is vacuously true for every key,
    /// the degenerate always-positive filter. [`FilterConfig::validate`]
    /// flags the configurations that lead here.
    ///
    /// [`FilterConfig::validate`]: super::config::FilterConfig::validate
    pub fn check(&self, key: JoinKey) -> bool {
        self.hashes.iter().all(|hash| self.bits[hash.slot(key)])
    }

    /// Replace the bit vector wholesale with externally supplied bits.
    ///
    /// Used by the receiving side after transport. Hash bindings are not
    /// altered. A vector of the wrong length is rejected before any mutation.
    pub fn load_vector(&mut self, vector: &FilterVector) -> Result<(), FilterError> {
        if vector.len() != self.slot_count {
            return Err(FilterError::VectorLengthMismatch {
                expected: self.slot_count,
                actual: vector.len(),
            });
        }
        self.bits = vector.to_bits();
        Ok(())
    }

    /// The current bit vector, for transmission.
    pub fn export_vector(&self) -> FilterVector {
        FilterVector::from_bits(&self.bits)
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Bit vector length (m).
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Configured number of hash functions (k).
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Whether a hash function list has been bound.
    pub fn is_bound(&self) -> bool {
        !self.hashes.is_empty()
    }

    /// The bound hash functions, in binding order.
    pub fn hash_functions(&self) -> &[UniversalHash] {
        &self.hashes
    }

    /// Reset all bits to zero. Bindings stay.
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Bits set after each successive hashing pass over `keys`.
    ///
    /// Pass j applies hash function j to every key; entry j of the result is
    /// the cumulative count of set bits after passes 1..=j. Computed on a
    /// scratch vector, so the filter's own state is untouched. This is the
    /// saturation diagnostic the parameter sweep records.
    pub fn saturation_profile(&self, keys: &[JoinKey]) -> Vec<usize> {
        let mut scratch = bitvec![u8, Lsb0; 0; self.slot_count];
        let mut profile = Vec::with_capacity(self.hashes.len());
        for hash in &self.hashes {
            for &key in keys {
                scratch.set(hash.slot(key), true);
            }
            profile.push(scratch.count_ones());
        }
        profile
    }
}
