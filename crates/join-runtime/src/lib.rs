//! # Join Runtime
//!
//! Library half of the executable: argument handling, fixture data, and the
//! node wiring, kept callable so the integration suite can drive the exact
//! paths the binary runs.
//!
//! ## Modular Structure
//!
//! - `cli` - positional argument parsing with graceful-abort semantics
//! - `fixtures` - the deterministic employee/salary dataset
//! - `runtime` - wiring of the two nodes and the demo + sweep flow

pub mod cli;
pub mod fixtures;
pub mod runtime;

pub use cli::{parse_args, JoinArgs, USAGE};
pub use runtime::{run, wire_nodes, REPORT_PATH};
