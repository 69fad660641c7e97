//! Canonical join-key derivation.
//!
//! The membership filter operates on integers, while relations identify rows
//! by string identifiers ("10012", "emp-441"). Both nodes must map the same
//! identifier to the same integer, on every platform and every run.
//!
//! Numeric identifiers parse as decimal. Anything else is hashed with
//! MurmurHash3 at a fixed seed, truncated to 64 bits.

use std::io::Cursor;

/// The integer form of a row identifier, as fed into the membership filter.
pub type JoinKey = u64;

/// Fixed seed for the murmur3 fallback. Changing this value changes every
/// derived key, so both nodes must be built from the same revision.
pub const KEY_DERIVATION_SEED: u32 = 0x6A6F_696E; // "join"

/// Derive the canonical integer key for a row identifier.
///
/// Decimal identifiers map to their numeric value; all others map to the
/// lower 64 bits of `murmur3_x64_128(bytes, KEY_DERIVATION_SEED)`.
pub fn canonical_key(id: &str) -> JoinKey {
    if let Ok(n) = id.parse::<u64>() {
        return n;
    }
    let mut cursor = Cursor::new(id.as_bytes());
    murmur3::murmur3_x64_128(&mut cursor, KEY_DERIVATION_SEED).unwrap_or(0) as u64
}
