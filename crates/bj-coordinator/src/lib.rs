//! # BJ-Coordinator - Semi-Join Orchestration
//!
//! Drives one semi-join end to end:
//!
//! 1. Choose (m, k) and draw the hash coefficients ONCE.
//! 2. Configure + bind + populate on the local node; export the bit vector.
//! 3. Configure + bind the SAME coefficients on the peer; resolve candidates
//!    against the shipped vector.
//! 4. Reconcile: strip false positives by re-checking candidates against the
//!    local matched key set.
//!
//! The one rule that keeps the protocol sound: coefficients are captured
//! once and transmitted. Redrawing on the peer, even from the same seed
//! logic, is how the no-false-negative guarantee silently dies.
//!
//! On top of the coordinator sit the parameter sweep ([`SweepAnalyzer`]),
//! which runs the full exchange per (m, k) grid cell, and the CSV report
//! writer for its result matrix.

pub mod coordinator;
pub mod report;
pub mod stats;
pub mod sweep;

pub use coordinator::{ClassicOutcome, JoinOutcome, JoinParams, SemiJoinCoordinator};
pub use report::{write_report, ReportError};
pub use stats::{wire_size, TransferStats};
pub use sweep::{SweepAnalyzer, SweepCell, SweepMatrix, SweepPlan};
