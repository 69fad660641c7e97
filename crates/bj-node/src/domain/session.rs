//! Per-join session.
//!
//! One session owns one filter and walks it through the exchange:
//!
//! ```text
//! Uninitialized → Configured → Populated → Exchanged → Resolved
//! ```
//!
//! The sending node takes the Populated/export path, the receiving node the
//! load/Resolved path; both paths share the same machine. Every operation
//! checks the state first and mutates nothing on rejection, so an
//! out-of-order caller cannot leave a session half-updated.

use uuid::Uuid;

use bj_filter::{FilterConfig, FilterVector, MembershipFilter, UniversalHash};
use shared_types::JoinKey;

use crate::error::ServiceError;

/// Where a session is in the exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Opened, nothing configured.
    Uninitialized,
    /// Filter sized; hash functions may or may not be bound yet.
    Configured,
    /// Local keys added under the bound configuration.
    Populated,
    /// Bit vector exported to, or loaded from, the peer.
    Exchanged,
    /// Candidate rows fetched; the session is spent.
    Resolved,
}

/// Diagnostics of a populated session, consumed locally by the coordinator
/// (false-positive reconciliation) and the sweep (saturation cells). Never
/// shipped to the peer.
#[derive(Clone, Debug)]
pub struct SessionDiagnostics {
    /// Keys the local scan matched, in add order.
    pub matched_keys: Vec<JoinKey>,
    /// Bits set after each successive hashing pass over the matched keys.
    pub saturation: Vec<usize>,
}

/// One join attempt's state on one node.
pub struct JoinSession {
    id: Uuid,
    state: SessionState,
    filter: Option<MembershipFilter>,
    matched_keys: Vec<JoinKey>,
    saturation: Vec<usize>,
}

impl JoinSession {
    /// Open a fresh session.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            state: SessionState::Uninitialized,
            filter: None,
            matched_keys: Vec::new(),
            saturation: Vec::new(),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Size (or re-size) the filter. Allowed from any state: configuring is
    /// the reset that makes a session safe to drive again, discarding stale
    /// bits along with the old bindings.
    pub fn configure(&mut self, config: FilterConfig) -> Result<(), ServiceError> {
        config.validate()?;
        self.filter = Some(MembershipFilter::new(config.slot_count, config.hash_count)?);
        self.matched_keys.clear();
        self.saturation.clear();
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Bind the transmitted hash functions. Only valid while Configured;
    /// re-binding after population would corrupt the exchanged bits.
    pub fn bind(&mut self, hashes: Vec<UniversalHash>) -> Result<(), ServiceError> {
        self.guard("bind_hash_functions", &[SessionState::Configured])?;
        self.filter_mut("bind_hash_functions")?
            .bind_hash_functions(hashes)?;
        Ok(())
    }

    /// Bind from wire coefficients, reconstructing each hash function against
    /// this session's slot count. The coefficients carry no sizing of their
    /// own; the peer's configure call already fixed it.
    pub fn bind_coefficients(&mut self, coefficients: Vec<(u64, u64)>) -> Result<(), ServiceError> {
        self.guard("bind_hash_functions", &[SessionState::Configured])?;
        let slot_count = self.filter_ref("bind_hash_functions")?.slot_count();
        let hashes = coefficients
            .into_iter()
            .map(|pair| UniversalHash::from_coefficients(pair, slot_count))
            .collect();
        self.bind(hashes)
    }

    /// Add the matched keys of the local scan and record the saturation
    /// profile. Requires a bound, Configured filter.
    pub fn populate(&mut self, keys: Vec<JoinKey>) -> Result<usize, ServiceError> {
        self.guard("populate_from_predicate", &[SessionState::Configured])?;
        self.ensure_bound()?;
        let filter = self.filter_mut("populate_from_predicate")?;
        for &key in &keys {
            filter.add(key);
        }
        self.saturation = self
            .filter_ref("populate_from_predicate")?
            .saturation_profile(&keys);
        let count = keys.len();
        self.matched_keys = keys;
        self.state = SessionState::Populated;
        Ok(count)
    }

    /// Export the populated bit vector for transmission.
    pub fn export(&mut self) -> Result<FilterVector, ServiceError> {
        self.guard("export_filter_vector", &[SessionState::Populated])?;
        let vector = self.filter_ref("export_filter_vector")?.export_vector();
        self.state = SessionState::Exchanged;
        Ok(vector)
    }

    /// Load the peer's bit vector. Requires a bound, Configured filter; the
    /// receiving side never populates before loading.
    pub fn load_vector(&mut self, vector: &FilterVector) -> Result<(), ServiceError> {
        self.guard("resolve_by_vector", &[SessionState::Configured])?;
        self.ensure_bound()?;
        self.filter_mut("resolve_by_vector")?.load_vector(vector)?;
        self.state = SessionState::Exchanged;
        Ok(())
    }

    /// Probe the loaded filter with the local key universe, keeping the keys
    /// that might be in the sender's set.
    pub fn candidate_keys(&self, universe: &[JoinKey]) -> Result<Vec<JoinKey>, ServiceError> {
        self.guard("candidate_keys", &[SessionState::Exchanged])?;
        let filter = self.filter_ref("candidate_keys")?;
        Ok(universe
            .iter()
            .copied()
            .filter(|&key| filter.check(key))
            .collect())
    }

    /// Mark the candidate rows as fetched; the session is spent.
    pub fn mark_resolved(&mut self) -> Result<(), ServiceError> {
        self.guard("mark_resolved", &[SessionState::Exchanged])?;
        self.state = SessionState::Resolved;
        Ok(())
    }

    /// Local diagnostics of a populated session.
    pub fn diagnostics(&self) -> Result<SessionDiagnostics, ServiceError> {
        self.guard(
            "session_diagnostics",
            &[
                SessionState::Populated,
                SessionState::Exchanged,
                SessionState::Resolved,
            ],
        )?;
        Ok(SessionDiagnostics {
            matched_keys: self.matched_keys.clone(),
            saturation: self.saturation.clone(),
        })
    }

    fn guard(
        &self,
        operation: &'static str,
        allowed: &[SessionState],
    ) -> Result<(), ServiceError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ServiceError::InvalidTransition {
                operation,
                state: self.state,
            })
        }
    }

    fn ensure_bound(&self) -> Result<(), ServiceError> {
        match &self.filter {
            Some(filter) if filter.is_bound() => Ok(()),
            _ => Err(ServiceError::HashesUnbound(self.id)),
        }
    }

    fn filter_ref(&self, operation: &'static str) -> Result<&MembershipFilter, ServiceError> {
        self.filter.as_ref().ok_or(ServiceError::InvalidTransition {
            operation,
            state: self.state,
        })
    }

    fn filter_mut(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut MembershipFilter, ServiceError> {
        let state = self.state;
        self.filter.as_mut().ok_or(ServiceError::InvalidTransition {
            operation,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn drawn_hashes(slot_count: usize, hash_count: usize, seed: u64) -> Vec<UniversalHash> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..hash_count)
            .map(|_| UniversalHash::draw(&mut rng, slot_count))
            .collect()
    }

    fn configured_session() -> JoinSession {
        let mut session = JoinSession::new(Uuid::new_v4());
        session.configure(FilterConfig::new(64, 3).unwrap()).unwrap();
        session.bind(drawn_hashes(64, 3, 42)).unwrap();
        session
    }

    #[test]
    fn test_fresh_session_is_uninitialized() {
        let session = JoinSession::new(Uuid::new_v4());
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_populate_before_configure_is_rejected() {
        let mut session = JoinSession::new(Uuid::new_v4());

        let err = session.populate(vec![1, 2, 3]).unwrap_err();
        assert!(
            matches!(
                err,
                ServiceError::InvalidTransition {
                    operation: "populate_from_predicate",
                    state: SessionState::Uninitialized,
                }
            ),
            "Got {:?}",
            err
        );
        assert_eq!(
            session.state(),
            SessionState::Uninitialized,
            "Rejected call must not advance the state"
        );
    }

    #[test]
    fn test_populate_before_bind_is_rejected() {
        let mut session = JoinSession::new(Uuid::new_v4());
        session.configure(FilterConfig::new(64, 3).unwrap()).unwrap();

        assert!(matches!(
            session.populate(vec![1]).unwrap_err(),
            ServiceError::HashesUnbound(_)
        ));
        assert_eq!(session.state(), SessionState::Configured);
    }

    #[test]
    fn test_export_before_populate_is_rejected() {
        let mut session = configured_session();

        assert!(matches!(
            session.export().unwrap_err(),
            ServiceError::InvalidTransition {
                operation: "export_filter_vector",
                state: SessionState::Configured,
            }
        ));
    }

    #[test]
    fn test_sender_path_walks_the_machine() {
        let mut session = configured_session();

        let count = session.populate(vec![12, 55, 98]).unwrap();
        assert_eq!(count, 3);
        assert_eq!(session.state(), SessionState::Populated);

        let vector = session.export().unwrap();
        assert_eq!(vector.len(), 64);
        assert_eq!(session.state(), SessionState::Exchanged);
    }

    #[test]
    fn test_receiver_path_walks_the_machine() {
        // Sender populates and exports
        let mut sender = configured_session();
        let hashes = drawn_hashes(64, 3, 42);
        sender.populate(vec![12, 55, 98]).unwrap();
        let vector = sender.export().unwrap();

        // Receiver with the same configuration resolves
        let mut receiver = JoinSession::new(Uuid::new_v4());
        receiver
            .configure(FilterConfig::new(64, 3).unwrap())
            .unwrap();
        receiver.bind(hashes).unwrap();
        receiver.load_vector(&vector).unwrap();
        assert_eq!(receiver.state(), SessionState::Exchanged);

        let candidates = receiver
            .candidate_keys(&[12, 20, 55, 60, 98, 100])
            .unwrap();
        for key in [12, 55, 98] {
            assert!(candidates.contains(&key), "Missing true positive {}", key);
        }

        receiver.mark_resolved().unwrap();
        assert_eq!(receiver.state(), SessionState::Resolved);
    }

    #[test]
    fn test_resolved_session_rejects_further_operations() {
        let mut session = configured_session();
        session.populate(vec![1]).unwrap();
        session.export().unwrap();
        session.mark_resolved().unwrap();

        assert!(session.populate(vec![2]).is_err());
        assert!(session.export().is_err());
    }

    #[test]
    fn test_configure_resets_a_spent_session() {
        let mut session = configured_session();
        session.populate(vec![1, 2]).unwrap();
        session.export().unwrap();

        session.configure(FilterConfig::new(32, 2).unwrap()).unwrap();

        assert_eq!(session.state(), SessionState::Configured);
        assert!(
            session.diagnostics().is_err(),
            "Reset must discard stale diagnostics"
        );
    }

    #[test]
    fn test_diagnostics_capture_population() {
        let mut session = configured_session();
        session.populate(vec![12, 55, 98]).unwrap();

        let diag = session.diagnostics().unwrap();
        assert_eq!(diag.matched_keys, vec![12, 55, 98]);
        assert_eq!(diag.saturation.len(), 3);
        assert!(diag.saturation.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_configure_rejects_zero_sizing() {
        let mut session = JoinSession::new(Uuid::new_v4());
        assert!(session.configure(FilterConfig { slot_count: 0, hash_count: 3 }).is_err());
        assert_eq!(session.state(), SessionState::Uninitialized);
    }
}
