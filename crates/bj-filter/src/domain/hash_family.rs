//! Pairwise-independent hash family.
//!
//! `slot(x) = ((a*x + b) mod p) mod m` with p = 2^61 - 1. Drawing `a` from
//! [1, p) and `b` from [0, p) gives pairwise independence over the family,
//! which bounds collision probability for any fixed pair of keys.
//!
//! A hash function is a value: two instances with equal `(a, b, m)` agree on
//! every key, and equality is defined by exactly those fields. This is the
//! linchpin of the replication protocol: the originator draws, the peer
//! receives, and both sides address identical slots.

use rand::Rng;
use serde::{Deserialize, Serialize};

use shared_types::JoinKey;

/// Modulus of the hash family. Mersenne prime 2^61 - 1.
pub const MERSENNE_PRIME: u64 = (1 << 61) - 1;

/// One member of the hash family: immutable `(a, b)` coefficients plus the
/// slot count it addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalHash {
    a: u64,
    b: u64,
    slot_count: u64,
}

impl UniversalHash {
    /// Draw a fresh member of the family for `slot_count` slots.
    ///
    /// Only the originating side of a join draws; the peer reconstructs via
    /// [`UniversalHash::from_coefficients`].
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, slot_count: usize) -> Self {
        Self {
            a: rng.gen_range(1..MERSENNE_PRIME),
            b: rng.gen_range(0..MERSENNE_PRIME),
            slot_count: slot_count as u64,
        }
    }

    /// Rebuild a transmitted hash function from its wire coefficients.
    pub fn from_coefficients(coefficients: (u64, u64), slot_count: usize) -> Self {
        Self {
            a: coefficients.0,
            b: coefficients.1,
            slot_count: slot_count as u64,
        }
    }

    /// The `(a, b)` pair as it travels on the wire.
    pub fn coefficients(&self) -> (u64, u64) {
        (self.a, self.b)
    }

    /// The slot count this function addresses.
    pub fn slot_count(&self) -> usize {
        self.slot_count as usize
    }

    /// Map a key to a slot in `[0, slot_count)`.
    ///
    /// Pure and deterministic given `(a, b, slot_count)`.
    pub fn slot(&self, key: JoinKey) -> usize {
        let x = (key % MERSENNE_PRIME) as u128;
        let h = (self.a as u128 * x + self.b as u128) % MERSENNE_PRIME as u128;
        (h % self.slot_count as u128) as usize
    }
}
