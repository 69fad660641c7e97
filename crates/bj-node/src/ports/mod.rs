//! Ports layer - trait definitions.

pub mod inbound;
pub mod outbound;

pub use inbound::{RemoteJoinApi, SessionId};
pub use outbound::RelationStore;
