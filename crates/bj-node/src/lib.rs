//! # BJ-Node - Remote Join Service
//!
//! The peer-facing contract of one database node in a semi-join. Each node
//! runs one [`JoinService`] over its local relation and answers the same set
//! of operations whether the caller is in-process (the coordinator's local
//! side) or across the channel (the remote side, via [`RemoteNodeClient`]).
//!
//! ## Architecture
//!
//! This crate follows Ports & Adapters:
//!
//! - **Domain** (`domain/`): the per-join session and its state machine
//! - **Ports** (`ports/`): trait definitions
//!   - [`RemoteJoinApi`]: driving port (the join contract)
//!   - [`RelationStore`]: driven port (narrow read interface to storage)
//! - **Service** (`service/`): [`JoinService`] implements `RemoteJoinApi`
//! - **Events** (`events/`): the request/response wire messages
//! - **Adapters** (`adapters/`):
//!   - [`MemoryStore`]: in-memory `RelationStore`
//!   - [`LinkServer`]: serve loop decoding frames into service calls
//!   - [`RemoteNodeClient`]: `RemoteJoinApi` spoken over a channel client
//!
//! ## Session lifecycle
//!
//! Every join attempt opens its own session with its own filter:
//!
//! ```text
//! Uninitialized → Configured → Populated → Exchanged → Resolved
//!   (open)    (configure+bind) (add burst)  (vector     (candidate
//!                                            shipped)    rows fetched)
//! ```
//!
//! Operations invoked out of order fail with a state error and leave the
//! session unmutated. Sessions are independent, so concurrent joins against
//! one node cannot corrupt each other's filters.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod service;

pub use adapters::{LinkServer, MemoryStore, RemoteNodeClient};
pub use domain::{JoinSession, SessionDiagnostics, SessionState};
pub use error::{ServiceError, StoreError};
pub use events::{error_codes, NodeRequest, NodeResponse};
pub use ports::{RelationStore, RemoteJoinApi, SessionId};
pub use service::JoinService;
