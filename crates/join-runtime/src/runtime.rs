//! Node wiring and the demo flow.
//!
//! Brings up both nodes in one process: the remote node's service behind a
//! [`LinkServer`] on its own task, the local node's service in-process, and
//! the coordinator across the two. The channel between them is the same
//! framed transport a networked deployment would use.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use bj_coordinator::{
    write_report, JoinParams, SemiJoinCoordinator, SweepAnalyzer, SweepPlan,
};
use bj_node::{JoinService, LinkServer, MemoryStore, RemoteNodeClient};
use shared_types::{Keyed, Predicate};

use crate::cli::JoinArgs;
use crate::fixtures;

/// Where the sweep report lands.
pub const REPORT_PATH: &str = "sweep_report.csv";

/// Base seed for the sweep's coefficient draws. Fixed so the report is
/// reproducible run to run.
const SWEEP_BASE_SEED: u64 = 0x626A_5357;

/// The demo join predicate.
fn demo_predicate() -> Predicate {
    Predicate::FirstNameIs("Mary".to_string())
}

/// Wire the two fixture nodes and return a coordinator across them.
///
/// The remote node serves on a spawned task; dropping the returned
/// coordinator closes the link and ends that task.
pub fn wire_nodes() -> SemiJoinCoordinator<MemoryStore> {
    let local = Arc::new(JoinService::new(Arc::new(MemoryStore::with_employees(
        fixtures::employees(),
    ))));

    let remote_service = Arc::new(JoinService::new(Arc::new(MemoryStore::with_salaries(
        fixtures::salaries(),
    ))));
    let (client, listener) = shared_channel::link();
    tokio::spawn(LinkServer::new(remote_service, listener).run());

    SemiJoinCoordinator::new(local, Arc::new(RemoteNodeClient::new(client)))
}

/// Run the demo join at the requested sizing, the classic comparison, and
/// the full parameter sweep.
pub async fn run(args: JoinArgs) -> anyhow::Result<()> {
    let coordinator = wire_nodes();
    let predicate = demo_predicate();

    // One semi-join at the requested (m, k).
    let params = JoinParams {
        slot_count: args.slot_count,
        hash_count: args.hash_count,
        predicate: predicate.clone(),
    };
    match coordinator
        .semi_join(&params, &mut StdRng::from_entropy())
        .await
    {
        Ok(outcome) => {
            info!(
                matched = outcome.matched_keys.len(),
                candidates = outcome.candidates.len(),
                verified = outcome.verified.len(),
                false_positives = outcome.false_positives,
                filter_bytes = outcome.stats.total(),
                "Semi-join finished"
            );
            for row in &outcome.verified {
                info!(key = row.join_key(), "Verified match");
            }
        }
        Err(e) => error!(error = %e, "Semi-join attempt yielded no result"),
    }

    // Classic comparison: every remote salary row travels.
    match coordinator
        .classic_join(predicate.clone(), Predicate::SalaryAbove(0))
        .await
    {
        Ok(outcome) => info!(
            joined = outcome.joined.len(),
            classic_bytes = outcome.stats.total(),
            "Classic join finished"
        ),
        Err(e) => error!(error = %e, "Classic join yielded no result"),
    }

    // Sweep the grid and write the report.
    let plan = SweepPlan {
        slot_counts: vec![64, 128, 256, 512, 1024],
        hash_counts: vec![1, 2, 3, 4, 5, 6],
        base_seed: SWEEP_BASE_SEED,
    };
    let analyzer = SweepAnalyzer::new(&coordinator, plan);
    let matrix = analyzer.run(&predicate).await;
    write_report(Path::new(REPORT_PATH), &matrix)
        .with_context(|| format!("writing sweep report to {}", REPORT_PATH))?;
    info!(report = REPORT_PATH, "Sweep report written");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wired_nodes_complete_a_join_over_the_channel() {
        let coordinator = wire_nodes();
        let params = JoinParams {
            slot_count: 256,
            hash_count: 3,
            predicate: demo_predicate(),
        };

        let outcome = coordinator
            .semi_join(&params, &mut StdRng::seed_from_u64(21))
            .await
            .expect("wired join should succeed");

        assert_eq!(
            outcome.verified.len(),
            4,
            "All four Mary rows resolve across the channel"
        );
    }
}
