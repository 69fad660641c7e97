//! Parameter sweep.
//!
//! Walks the (slot count, hash count) grid and runs one full semi-join per
//! cell, recording how saturated the filter got and how many false positives
//! slipped through. The per-cell RNG seed is derived from the plan's base
//! seed and the cell coordinates, so a rerun reproduces every cell bit for
//! bit.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use bj_node::RelationStore;
use shared_types::Predicate;

use crate::coordinator::{JoinParams, SemiJoinCoordinator};

/// The grid to explore.
#[derive(Clone, Debug)]
pub struct SweepPlan {
    /// Outer axis: bit vector lengths.
    pub slot_counts: Vec<usize>,
    /// Inner axis: hash function counts.
    pub hash_counts: Vec<usize>,
    /// Base seed for per-cell coefficient draws.
    pub base_seed: u64,
}

/// One grid cell's measurements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepCell {
    /// Bit vector length (m).
    pub slot_count: usize,
    /// Number of hash functions (k).
    pub hash_count: usize,
    /// Bits set after the 1st/2nd/3rd hashing pass. For k < 3 the final
    /// count repeats; an aborted cell reads all zeros.
    pub bits_after_pass: [usize; 3],
    /// |candidate set| - |true positive set|.
    pub false_positives: usize,
}

/// Dense result grid, indexed `cells[slot index][hash index]`.
#[derive(Clone, Debug)]
pub struct SweepMatrix {
    pub slot_counts: Vec<usize>,
    pub hash_counts: Vec<usize>,
    pub cells: Vec<Vec<SweepCell>>,
}

/// Runs the grid against a fixed predicate and key universe.
pub struct SweepAnalyzer<'a, S: RelationStore> {
    coordinator: &'a SemiJoinCoordinator<S>,
    plan: SweepPlan,
}

impl<'a, S: RelationStore + 'static> SweepAnalyzer<'a, S> {
    /// Attach a plan to a coordinator.
    pub fn new(coordinator: &'a SemiJoinCoordinator<S>, plan: SweepPlan) -> Self {
        Self { coordinator, plan }
    }

    /// Run every cell sequentially. A failed cell is logged and recorded
    /// empty; the sweep never retries and the remaining cells still run.
    pub async fn run(&self, predicate: &Predicate) -> SweepMatrix {
        let mut cells = Vec::with_capacity(self.plan.slot_counts.len());

        for &slot_count in &self.plan.slot_counts {
            let mut column = Vec::with_capacity(self.plan.hash_counts.len());
            for &hash_count in &self.plan.hash_counts {
                column.push(self.run_cell(slot_count, hash_count, predicate).await);
            }
            cells.push(column);
        }

        info!(
            slot_counts = self.plan.slot_counts.len(),
            hash_counts = self.plan.hash_counts.len(),
            "Sweep finished"
        );

        SweepMatrix {
            slot_counts: self.plan.slot_counts.clone(),
            hash_counts: self.plan.hash_counts.clone(),
            cells,
        }
    }

    async fn run_cell(
        &self,
        slot_count: usize,
        hash_count: usize,
        predicate: &Predicate,
    ) -> SweepCell {
        let params = JoinParams {
            slot_count,
            hash_count,
            predicate: predicate.clone(),
        };
        let mut rng = StdRng::seed_from_u64(cell_seed(self.plan.base_seed, slot_count, hash_count));

        match self.coordinator.semi_join(&params, &mut rng).await {
            Ok(outcome) => SweepCell {
                slot_count,
                hash_count,
                bits_after_pass: first_three_passes(&outcome.saturation),
                false_positives: outcome.false_positives,
            },
            Err(e) => {
                warn!(
                    slot_count,
                    hash_count,
                    error = %e,
                    "Sweep cell aborted, recording empty cell"
                );
                SweepCell {
                    slot_count,
                    hash_count,
                    ..SweepCell::default()
                }
            }
        }
    }
}

/// Deterministic per-cell seed: the same (base, m, k) always draws the same
/// coefficients on a rerun.
fn cell_seed(base_seed: u64, slot_count: usize, hash_count: usize) -> u64 {
    base_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((slot_count as u64) << 20)
        .wrapping_add(hash_count as u64)
}

/// Saturation after passes 1..3, repeating the last pass when k < 3.
fn first_three_passes(saturation: &[usize]) -> [usize; 3] {
    let last = saturation.last().copied().unwrap_or(0);
    [
        saturation.first().copied().unwrap_or(0),
        saturation.get(1).copied().unwrap_or(last),
        saturation.get(2).copied().unwrap_or(last),
    ]
}
