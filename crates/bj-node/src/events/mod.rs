//! Events layer - the wire messages of the join contract.

pub mod requests;
pub mod responses;

pub use requests::NodeRequest;
pub use responses::{error_codes, NodeResponse};
