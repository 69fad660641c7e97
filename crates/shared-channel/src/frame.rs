//! Frame encoding.
//!
//! A frame is the version header plus a bincode payload. The header is
//! decoded first and checked against [`WIRE_VERSION`](crate::WIRE_VERSION)
//! before the payload bytes are touched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::WIRE_VERSION;

/// The on-wire shape of every message.
#[derive(Debug, Serialize, Deserialize)]
struct Frame {
    /// Protocol version; checked before the payload is decoded.
    version: u16,
    /// Bincode-encoded payload.
    payload: Vec<u8>,
}

/// Encode a value into a version-tagged frame.
pub fn encode_frame<T: Serialize>(value: &T) -> Result<Vec<u8>, ChannelError> {
    let payload = bincode::serialize(value).map_err(|e| ChannelError::Encode(e.to_string()))?;
    let frame = Frame {
        version: WIRE_VERSION,
        payload,
    };
    bincode::serialize(&frame).map_err(|e| ChannelError::Encode(e.to_string()))
}

/// Decode a version-tagged frame back into a value.
pub fn decode_frame<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ChannelError> {
    let frame: Frame =
        bincode::deserialize(bytes).map_err(|e| ChannelError::Decode(e.to_string()))?;
    if frame.version != WIRE_VERSION {
        return Err(ChannelError::VersionMismatch {
            expected: WIRE_VERSION,
            actual: frame.version,
        });
    }
    bincode::deserialize(&frame.payload).map_err(|e| ChannelError::Decode(e.to_string()))
}
