//! Response messages.

use serde::{Deserialize, Serialize};

use bj_filter::FilterVector;
use shared_types::JoinRow;

use crate::error::ServiceError;
use crate::ports::SessionId;

/// A join node's answer to one [`NodeRequest`](super::NodeRequest).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NodeResponse {
    /// A session was opened.
    SessionOpened { session: SessionId },
    /// The operation succeeded with nothing to return.
    Ack,
    /// Keys matched and added by a populate call.
    MatchedCount { count: u64 },
    /// The exported bit vector.
    FilterVector { vector: FilterVector },
    /// Candidate or baseline rows.
    Rows { rows: Vec<JoinRow> },
    /// The operation was rejected.
    Error { code: u32, message: String },
}

impl NodeResponse {
    /// Map a service failure onto the wire.
    pub fn from_error(error: &ServiceError) -> Self {
        Self::Error {
            code: error_codes::for_error(error),
            message: error.to_string(),
        }
    }
}

/// Error codes for join operations.
pub mod error_codes {
    use crate::error::ServiceError;

    /// Filter sizing or binding was invalid.
    pub const INVALID_CONFIGURATION: u32 = 1001;
    /// Operation invoked out of session order.
    pub const STATE_VIOLATION: u32 = 1002;
    /// Session id is not known to this node.
    pub const UNKNOWN_SESSION: u32 = 1003;
    /// The backing store query failed.
    pub const STORE_FAILURE: u32 = 1004;
    /// The request frame could not be decoded.
    pub const MALFORMED_FRAME: u32 = 1005;
    /// Internal error.
    pub const INTERNAL_ERROR: u32 = 1099;

    /// The code a service failure reports on the wire.
    pub fn for_error(error: &ServiceError) -> u32 {
        match error {
            ServiceError::Filter(_) => INVALID_CONFIGURATION,
            ServiceError::InvalidTransition { .. } | ServiceError::HashesUnbound(_) => {
                STATE_VIOLATION
            }
            ServiceError::UnknownSession(_) => UNKNOWN_SESSION,
            ServiceError::Store(_) => STORE_FAILURE,
            ServiceError::Transport(_)
            | ServiceError::PeerRejected { .. }
            | ServiceError::UnexpectedResponse => INTERNAL_ERROR,
        }
    }
}
