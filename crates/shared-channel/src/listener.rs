//! The serving side of a link.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::link::FramedRequest;

/// One request pulled off the link, holding the slot its reply goes into.
pub struct IncomingRequest {
    frame: Vec<u8>,
    reply: oneshot::Sender<Vec<u8>>,
}

impl IncomingRequest {
    /// The raw request frame.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Answer the request. A caller that already hung up is ignored; the
    /// serve loop has nothing further to do with the frame either way.
    pub fn respond(self, frame: Vec<u8>) {
        if self.reply.send(frame).is_err() {
            debug!("Caller dropped before reply was delivered");
        }
    }
}

/// The listening endpoint of a link. Owned by a node's serve loop.
pub struct LinkListener {
    rx: mpsc::Receiver<FramedRequest>,
}

impl LinkListener {
    pub(crate) fn new(rx: mpsc::Receiver<FramedRequest>) -> Self {
        Self { rx }
    }

    /// Wait for the next request. Returns `None` once every client handle
    /// has been dropped, which ends the serve loop.
    pub async fn next_request(&mut self) -> Option<IncomingRequest> {
        self.rx
            .recv()
            .await
            .map(|(frame, reply)| IncomingRequest { frame, reply })
    }
}
