//! # BloomJoin Test Suite
//!
//! Cross-crate tests: full semi-join exchanges over the channel, the
//! statistical behavior of the filter, and the runtime's abort paths.

pub mod integration;
