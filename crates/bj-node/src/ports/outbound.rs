//! Outbound port (driven side): the relational store.
//!
//! The narrowest read interface the join needs. Injected into the service as
//! an explicit capability, so tests substitute an in-memory store and nothing
//! reaches for a process-wide connection.

use async_trait::async_trait;

use shared_types::{JoinKey, JoinRow, Predicate};

use crate::error::StoreError;

/// Read access to the node's local relation.
#[async_trait]
pub trait RelationStore: Send + Sync {
    /// Rows matching a predicate.
    async fn scan(&self, predicate: &Predicate) -> Result<Vec<JoinRow>, StoreError>;

    /// Every join key in the local relation, the universe a received filter
    /// is probed against.
    async fn all_keys(&self) -> Result<Vec<JoinKey>, StoreError>;

    /// Full rows for one join key. Empty when the key is absent; the caller
    /// must not assume a candidate key exists.
    async fn fetch_by_key(&self, key: JoinKey) -> Result<Vec<JoinRow>, StoreError>;
}
