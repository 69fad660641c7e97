//! Adapters layer - external connections.

pub mod link_server;
pub mod memory_store;
pub mod remote_client;

pub use link_server::LinkServer;
pub use memory_store::MemoryStore;
pub use remote_client::RemoteNodeClient;
