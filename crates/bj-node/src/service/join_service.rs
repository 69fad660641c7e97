//! Join service.
//!
//! Implements the join contract over an injected [`RelationStore`]. All
//! session state lives in a table keyed by session id; each session owns its
//! own filter, so overlapping joins against one node stay independent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bj_filter::{FilterConfig, FilterVector};
use shared_types::{JoinRow, Keyed, Predicate};

use crate::domain::{JoinSession, SessionDiagnostics};
use crate::error::ServiceError;
use crate::ports::{RelationStore, RemoteJoinApi, SessionId};

/// One node's implementation of the join contract.
pub struct JoinService<S: RelationStore> {
    /// Read capability for the local relation (driven port).
    store: Arc<S>,
    /// Sessions by id; one per in-flight join attempt.
    sessions: RwLock<HashMap<SessionId, JoinSession>>,
}

impl<S: RelationStore> JoinService<S> {
    /// Create a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Local diagnostics of a populated session: matched keys and the
    /// per-pass saturation profile. Not part of the wire contract; the
    /// coordinator reads this from its own node only.
    pub async fn session_diagnostics(
        &self,
        session: SessionId,
    ) -> Result<SessionDiagnostics, ServiceError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session)
            .ok_or(ServiceError::UnknownSession(session))?
            .diagnostics()
    }

    async fn ensure_session(&self, session: SessionId) -> Result<(), ServiceError> {
        let sessions = self.sessions.read().await;
        if sessions.contains_key(&session) {
            Ok(())
        } else {
            Err(ServiceError::UnknownSession(session))
        }
    }
}

#[async_trait]
impl<S: RelationStore + 'static> RemoteJoinApi for JoinService<S> {
    async fn open_session(&self) -> Result<SessionId, ServiceError> {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, JoinSession::new(id));
        info!(session = %id, "Session opened");
        Ok(id)
    }

    async fn configure_filter(
        &self,
        session: SessionId,
        slot_count: usize,
        hash_count: usize,
    ) -> Result<(), ServiceError> {
        let config = FilterConfig::new(slot_count, hash_count)?;
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session)
            .ok_or(ServiceError::UnknownSession(session))?;
        entry.configure(config)?;
        debug!(
            session = %session,
            slot_count,
            hash_count,
            "Filter configured"
        );
        Ok(())
    }

    async fn bind_hash_functions(
        &self,
        session: SessionId,
        coefficients: Vec<(u64, u64)>,
    ) -> Result<(), ServiceError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session)
            .ok_or(ServiceError::UnknownSession(session))?;
        let count = coefficients.len();
        entry.bind_coefficients(coefficients)?;
        debug!(session = %session, hash_functions = count, "Hash functions bound");
        Ok(())
    }

    async fn populate_from_predicate(
        &self,
        session: SessionId,
        predicate: Predicate,
    ) -> Result<usize, ServiceError> {
        self.ensure_session(session).await?;

        let rows = self.store.scan(&predicate).await?;
        let keys: Vec<_> = rows.iter().map(Keyed::join_key).collect();

        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session)
            .ok_or(ServiceError::UnknownSession(session))?;
        let count = entry.populate(keys)?;
        info!(session = %session, matched = count, "Filter populated from local scan");
        Ok(count)
    }

    async fn export_filter_vector(
        &self,
        session: SessionId,
    ) -> Result<FilterVector, ServiceError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session)
            .ok_or(ServiceError::UnknownSession(session))?;
        let vector = entry.export()?;
        debug!(session = %session, bits = vector.len(), "Filter vector exported");
        Ok(vector)
    }

    async fn resolve_by_vector(
        &self,
        session: SessionId,
        vector: FilterVector,
    ) -> Result<Vec<JoinRow>, ServiceError> {
        {
            let mut sessions = self.sessions.write().await;
            let entry = sessions
                .get_mut(&session)
                .ok_or(ServiceError::UnknownSession(session))?;
            entry.load_vector(&vector)?;
        }

        let universe = self.store.all_keys().await?;
        let candidates = {
            let sessions = self.sessions.read().await;
            sessions
                .get(&session)
                .ok_or(ServiceError::UnknownSession(session))?
                .candidate_keys(&universe)?
        };

        let mut rows = Vec::new();
        for &key in &candidates {
            rows.extend(self.store.fetch_by_key(key).await?);
        }

        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&session)
            .ok_or(ServiceError::UnknownSession(session))?;
        entry.mark_resolved()?;
        info!(
            session = %session,
            universe = universe.len(),
            candidates = candidates.len(),
            rows = rows.len(),
            "Candidate rows resolved against received filter"
        );
        Ok(rows)
    }

    async fn query_by_predicate(
        &self,
        predicate: Predicate,
    ) -> Result<Vec<JoinRow>, ServiceError> {
        let rows = self.store.scan(&predicate).await?;
        debug!(rows = rows.len(), "Baseline predicate query served");
        Ok(rows)
    }

    async fn close_session(&self, session: SessionId) -> Result<(), ServiceError> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(&session).is_none() {
            warn!(session = %session, "Close of unknown session");
            return Err(ServiceError::UnknownSession(session));
        }
        debug!(session = %session, "Session closed");
        Ok(())
    }
}
