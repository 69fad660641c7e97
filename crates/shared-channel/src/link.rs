//! The calling side of a link.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::ChannelError;
use crate::frame::{decode_frame, encode_frame};

/// Raw frame plus the slot the listener answers into.
pub(crate) type FramedRequest = (Vec<u8>, oneshot::Sender<Vec<u8>>);

/// The requesting endpoint of a link.
///
/// Cloneable; every call gets its own reply slot, so interleaved callers
/// cannot receive each other's responses.
#[derive(Clone)]
pub struct LinkClient {
    tx: mpsc::Sender<FramedRequest>,
}

impl LinkClient {
    pub(crate) fn new(tx: mpsc::Sender<FramedRequest>) -> Self {
        Self { tx }
    }

    /// Send a raw frame and block until the peer replies.
    pub async fn call(&self, frame: Vec<u8>) -> Result<Vec<u8>, ChannelError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send((frame, reply_tx))
            .await
            .map_err(|_| ChannelError::Closed)?;
        debug!("Frame sent, awaiting reply");
        reply_rx.await.map_err(|_| ChannelError::Closed)
    }

    /// Encode a request, send it, and decode the typed response.
    pub async fn request<Req, Resp>(&self, request: &Req) -> Result<Resp, ChannelError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let frame = encode_frame(request)?;
        let reply = self.call(frame).await?;
        decode_frame(&reply)
    }
}
