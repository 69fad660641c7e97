//! # Shared Types Crate
//!
//! This crate contains the record schemas, join-key derivation, and predicate
//! types shared between the two nodes of a semi-join.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every wire-visible type is defined here with
//!   a fixed field order, so both ends of the channel decode identically.
//! - **Canonical Keys**: the integer fed into the membership filter is derived
//!   by one function, [`canonical_key`], on both nodes. Relying on a
//!   platform-defined string hash would silently break the no-false-negative
//!   guarantee the moment the two nodes disagree.

pub mod key;
pub mod predicate;
pub mod records;

pub use key::{canonical_key, JoinKey, KEY_DERIVATION_SEED};
pub use predicate::Predicate;
pub use records::{Employee, Gender, JoinRow, JoinedEmployee, Keyed, Salary};
