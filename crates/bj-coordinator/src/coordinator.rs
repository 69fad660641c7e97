//! The semi-join driver.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use tracing::{error, info};

use bj_filter::UniversalHash;
use bj_node::{JoinService, RelationStore, RemoteJoinApi, ServiceError};
use shared_types::{JoinKey, JoinRow, JoinedEmployee, Keyed, Predicate};

use crate::stats::{wire_size, TransferStats};

/// Tuning and predicate for one semi-join attempt.
#[derive(Clone, Debug)]
pub struct JoinParams {
    /// Bit vector length (m).
    pub slot_count: usize,
    /// Number of hash functions (k).
    pub hash_count: usize,
    /// The local predicate whose matches form the shipped key set.
    pub predicate: Predicate,
}

/// Result of one semi-join attempt.
#[derive(Debug)]
pub struct JoinOutcome {
    /// Keys the local predicate matched, in add order.
    pub matched_keys: Vec<JoinKey>,
    /// Bits set after each successive hashing pass on the local side.
    pub saturation: Vec<usize>,
    /// Rows the peer believed might match (superset of the truth).
    pub candidates: Vec<JoinRow>,
    /// Candidates whose key really is in the local matched set.
    pub verified: Vec<JoinRow>,
    /// |candidates| - |verified|.
    pub false_positives: usize,
    /// Bytes this attempt put on the wire.
    pub stats: TransferStats,
}

/// Result of the unfiltered baseline path.
#[derive(Debug)]
pub struct ClassicOutcome {
    /// Rows the local predicate matched.
    pub local_rows: Vec<JoinRow>,
    /// The peer's complete matching row set, shipped without summarization.
    pub remote_rows: Vec<JoinRow>,
    /// Employee/salary pairs joined on their key.
    pub joined: Vec<JoinedEmployee>,
    /// Bytes this attempt put on the wire.
    pub stats: TransferStats,
}

/// Drives one semi-join between a local service and a peer.
///
/// The local side is the concrete service (the coordinator reads its
/// session diagnostics for reconciliation); the peer is anything speaking
/// the join contract, whether a [`RemoteNodeClient`](bj_node::RemoteNodeClient)
/// across the channel or another in-process service in tests.
pub struct SemiJoinCoordinator<S: RelationStore> {
    local: Arc<JoinService<S>>,
    remote: Arc<dyn RemoteJoinApi>,
}

impl<S: RelationStore + 'static> SemiJoinCoordinator<S> {
    /// Pair a local service with a peer handle.
    pub fn new(local: Arc<JoinService<S>>, remote: Arc<dyn RemoteJoinApi>) -> Self {
        Self { local, remote }
    }

    /// Run one semi-join.
    ///
    /// Coefficients are drawn once from `rng` and shipped to both sides.
    /// Any transport, store, or state failure aborts the whole attempt;
    /// nothing is retried.
    pub async fn semi_join<R: Rng + ?Sized>(
        &self,
        params: &JoinParams,
        rng: &mut R,
    ) -> Result<JoinOutcome, ServiceError> {
        let coefficients: Vec<(u64, u64)> = (0..params.hash_count)
            .map(|_| UniversalHash::draw(rng, params.slot_count).coefficients())
            .collect();

        let result = self.exchange(params, &coefficients).await;
        if let Err(e) = &result {
            error!(error = %e, "Semi-join attempt aborted");
        }
        result
    }

    async fn exchange(
        &self,
        params: &JoinParams,
        coefficients: &[(u64, u64)],
    ) -> Result<JoinOutcome, ServiceError> {
        // Local side: build and export the summary.
        let local = self.local.open_session().await?;
        self.local
            .configure_filter(local, params.slot_count, params.hash_count)
            .await?;
        self.local
            .bind_hash_functions(local, coefficients.to_vec())
            .await?;
        let matched = self
            .local
            .populate_from_predicate(local, params.predicate.clone())
            .await?;
        let diagnostics = self.local.session_diagnostics(local).await?;
        let vector = self.local.export_filter_vector(local).await?;

        info!(
            matched,
            slot_count = params.slot_count,
            hash_count = params.hash_count,
            "Local filter built, shipping summary to peer"
        );

        // Peer side: replicate the configuration, then resolve.
        let remote = self.remote.open_session().await?;
        self.remote
            .configure_filter(remote, params.slot_count, params.hash_count)
            .await?;
        self.remote
            .bind_hash_functions(remote, coefficients.to_vec())
            .await?;
        let candidates = self.remote.resolve_by_vector(remote, vector.clone()).await?;

        self.local.close_session(local).await?;
        self.remote.close_session(remote).await?;

        // Reconcile: a candidate is real iff its key was in the local scan.
        let matched_set: HashSet<JoinKey> = diagnostics.matched_keys.iter().copied().collect();
        let verified: Vec<JoinRow> = candidates
            .iter()
            .filter(|row| matched_set.contains(&row.join_key()))
            .cloned()
            .collect();
        let false_positives = candidates.len() - verified.len();

        let stats = TransferStats {
            coefficient_bytes: wire_size(&coefficients.to_vec()),
            vector_bytes: wire_size(&vector),
            row_bytes: wire_size(&candidates),
        };

        info!(
            candidates = candidates.len(),
            verified = verified.len(),
            false_positives,
            wire_bytes = stats.total(),
            "Semi-join resolved"
        );

        Ok(JoinOutcome {
            matched_keys: diagnostics.matched_keys,
            saturation: diagnostics.saturation,
            candidates,
            verified,
            false_positives,
            stats,
        })
    }

    /// The classic comparison path: no filter, both row sets travel whole.
    ///
    /// The peer evaluates `remote_predicate` and ships every matching row;
    /// the join happens here, against the local predicate's matches.
    pub async fn classic_join(
        &self,
        local_predicate: Predicate,
        remote_predicate: Predicate,
    ) -> Result<ClassicOutcome, ServiceError> {
        let local_rows = self.local.query_by_predicate(local_predicate).await?;
        let remote_rows = self.remote.query_by_predicate(remote_predicate).await?;

        let stats = TransferStats {
            coefficient_bytes: 0,
            vector_bytes: 0,
            row_bytes: wire_size(&remote_rows),
        };

        let joined = join_rows(&local_rows, &remote_rows);
        info!(
            local = local_rows.len(),
            remote = remote_rows.len(),
            joined = joined.len(),
            wire_bytes = stats.total(),
            "Classic join completed"
        );

        Ok(ClassicOutcome {
            local_rows,
            remote_rows,
            joined,
            stats,
        })
    }
}

/// Merge employee rows with salary rows sharing a join key.
fn join_rows(left: &[JoinRow], right: &[JoinRow]) -> Vec<JoinedEmployee> {
    let mut joined = Vec::new();
    for l in left {
        for r in right {
            if l.join_key() != r.join_key() {
                continue;
            }
            match (l, r) {
                (JoinRow::Employee(e), JoinRow::Salary(s))
                | (JoinRow::Salary(s), JoinRow::Employee(e)) => {
                    joined.push(JoinedEmployee::from_parts(e, s));
                }
                _ => {}
            }
        }
    }
    joined
}
