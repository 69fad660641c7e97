//! False-positive math.
//!
//! Formulas:
//! - FPR = (1 - e^(-kn/m))^k
//! - k* = (m/n) * ln 2        -- hash count minimizing FPR for fixed m, n
//!
//! The sweep uses these to sanity-check observed false-positive counts
//! against the model.

use std::f64::consts::LN_2;

/// Expected false-positive probability for a filter of `slot_count` bits and
/// `hash_count` hash functions after `added` keys.
///
/// Formula: (1 - e^(-kn/m))^k. Degenerate inputs saturate at 1.0: a zero-slot
/// or zero-hash filter answers true for everything.
pub fn false_positive_rate(slot_count: usize, added: usize, hash_count: usize) -> f64 {
    if slot_count == 0 || hash_count == 0 {
        return 1.0;
    }
    let exponent = -(hash_count as f64) * (added as f64) / (slot_count as f64);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}

/// The hash count minimizing the false-positive rate for `slot_count` bits
/// and `added` keys: k* = (m/n) * ln 2, at least 1.
pub fn optimal_hash_count(slot_count: usize, added: usize) -> usize {
    if added == 0 {
        return 1;
    }
    let k = ((slot_count as f64 / added as f64) * LN_2).round() as usize;
    k.max(1)
}
