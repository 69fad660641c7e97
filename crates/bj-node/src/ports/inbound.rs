//! Inbound port (driving side): the join contract.
//!
//! The coordinator drives two implementations of this trait per join: the
//! in-process [`JoinService`](crate::service::JoinService) and a
//! [`RemoteNodeClient`](crate::adapters::RemoteNodeClient) speaking the same
//! operations over the channel. Keeping both behind one trait is what lets
//! the protocol be exercised end-to-end in tests without a network.

use async_trait::async_trait;
use uuid::Uuid;

use bj_filter::FilterVector;
use shared_types::{JoinRow, Predicate};

use crate::error::ServiceError;

/// Identifies one join attempt's session on one node.
pub type SessionId = Uuid;

/// The operations a join node exposes to a peer.
///
/// Sessions walk the lifecycle described in
/// [`SessionState`](crate::domain::SessionState); calls out of order fail
/// with a state error rather than operating on default state.
#[async_trait]
pub trait RemoteJoinApi: Send + Sync {
    /// Open a session scoped to one join attempt.
    async fn open_session(&self) -> Result<SessionId, ServiceError>;

    /// Size the session's filter: `slot_count` bits, `hash_count` hash
    /// functions. Resets any previous state the session held.
    async fn configure_filter(
        &self,
        session: SessionId,
        slot_count: usize,
        hash_count: usize,
    ) -> Result<(), ServiceError>;

    /// Bind the originator's drawn coefficients. The list length must equal
    /// the configured hash count.
    async fn bind_hash_functions(
        &self,
        session: SessionId,
        coefficients: Vec<(u64, u64)>,
    ) -> Result<(), ServiceError>;

    /// Scan the local store with `predicate` and add every matching row's
    /// key to the session filter. Returns the matched key count, not the
    /// rows, which would defeat the point of shipping a summary.
    async fn populate_from_predicate(
        &self,
        session: SessionId,
        predicate: Predicate,
    ) -> Result<usize, ServiceError>;

    /// Retrieve the populated bit vector for shipment to the peer.
    async fn export_filter_vector(&self, session: SessionId)
        -> Result<FilterVector, ServiceError>;

    /// Load the peer's bits, scan the local key universe, and return full
    /// rows for every key that passes the filter. The result is a superset
    /// of the true match set.
    async fn resolve_by_vector(
        &self,
        session: SessionId,
        vector: FilterVector,
    ) -> Result<Vec<JoinRow>, ServiceError>;

    /// Unfiltered baseline: complete matching rows, no summarization.
    async fn query_by_predicate(&self, predicate: Predicate)
        -> Result<Vec<JoinRow>, ServiceError>;

    /// Discard a session and its filter.
    async fn close_session(&self, session: SessionId) -> Result<(), ServiceError>;
}
