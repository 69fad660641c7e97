//! # Shared Channel - Request/Response Transport Between Join Nodes
//!
//! The semi-join protocol is strictly call-and-return: one node issues a
//! request and blocks until the peer answers. This crate provides that
//! channel as an opaque pair of endpoints:
//!
//! ```text
//! ┌──────────────┐   call(frame)    ┌──────────────┐
//! │  LinkClient  │ ───────────────→ │ LinkListener │
//! │ (coordinator │                  │ (serve loop  │
//! │    side)     │ ←─────────────── │  on the node)│
//! └──────────────┘   reply(frame)   └──────────────┘
//! ```
//!
//! Frames are version-tagged bincode. Both ends check the version before
//! decoding, so a node built against a newer protocol fails loudly instead of
//! misreading fields.
//!
//! There are no timeouts and no retries: a dropped listener surfaces as
//! [`ChannelError::Closed`] and the enclosing join attempt aborts.

pub mod error;
pub mod frame;
pub mod link;
pub mod listener;

pub use error::ChannelError;
pub use frame::{decode_frame, encode_frame};
pub use link::LinkClient;
pub use listener::{IncomingRequest, LinkListener};

/// Current protocol version for channel frames.
pub const WIRE_VERSION: u16 = 1;

/// Maximum in-flight requests buffered per link before backpressure.
pub const DEFAULT_LINK_CAPACITY: usize = 64;

/// Create a connected client/listener pair with default capacity.
pub fn link() -> (LinkClient, LinkListener) {
    link_with_capacity(DEFAULT_LINK_CAPACITY)
}

/// Create a connected client/listener pair with the given capacity.
pub fn link_with_capacity(capacity: usize) -> (LinkClient, LinkListener) {
    let (tx, rx) = tokio::sync::mpsc::channel(capacity);
    (LinkClient::new(tx), LinkListener::new(rx))
}
