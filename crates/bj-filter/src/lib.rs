//! # BJ-Filter - Membership Filter and Hash Family
//!
//! The probabilistic core of the semi-join engine: a Bloom filter whose hash
//! functions are explicit, transmittable values.
//!
//! ## Why explicit coefficients
//!
//! Two nodes each hold a copy of the filter. The sender populates its copy and
//! ships only the bit vector; the receiver then probes its own copy with its
//! own keys. That works only if both copies address bits identically, so the
//! hash functions are pairwise-independent `(a*x + b) mod p mod m` maps whose
//! `(a, b)` coefficients are drawn once on the originating side and sent to
//! the peer. The peer never draws its own.
//!
//! ## Guarantees
//!
//! - No false negatives: every added key passes `check()`.
//! - False positives approach `(1 - e^(-kn/m))^k` for n added keys, and the
//!   figure is meaningless if the peer's configuration was not replicated
//!   exactly.
//!
//! ## Layout
//!
//! - `domain/hash_family` - the `(a, b, m)` universal hash
//! - `domain/filter` - bit-vector state and the add/check/load/export surface
//! - `domain/parameters` - false-positive math
//! - `domain/config` - sizing validation

pub mod domain;
pub mod error;

pub use domain::config::FilterConfig;
pub use domain::filter::{FilterVector, MembershipFilter};
pub use domain::hash_family::{UniversalHash, MERSENNE_PRIME};
pub use domain::parameters::{false_positive_rate, optimal_hash_count};
pub use error::FilterError;
