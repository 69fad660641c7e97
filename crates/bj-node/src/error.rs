//! Error types for the remote join service.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::SessionState;
use bj_filter::FilterError;
use shared_channel::ChannelError;

/// Errors from the backing relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store query failed: {0}")]
    QueryFailed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the join contract.
///
/// A failed operation performs no partial mutation: the session is left in
/// the state it was in before the call.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown session {0}")]
    UnknownSession(Uuid),

    #[error("{operation} is not allowed in session state {state:?}")]
    InvalidTransition {
        operation: &'static str,
        state: SessionState,
    },

    #[error("session {0} has no hash functions bound")]
    HashesUnbound(Uuid),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("transport error: {0}")]
    Transport(#[from] ChannelError),

    #[error("peer rejected request (code {code}): {message}")]
    PeerRejected { code: u32, message: String },

    #[error("peer sent a response of the wrong shape")]
    UnexpectedResponse,
}
