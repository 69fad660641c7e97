//! Request messages.
//!
//! One variant per contract operation. Arguments are simple values (session
//! ids, integers, coefficient pairs, bit vectors, predicates) with no
//! streaming; each request expects exactly one response.

use serde::{Deserialize, Serialize};

use bj_filter::FilterVector;
use shared_types::Predicate;

use crate::ports::SessionId;

/// A request to a join node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum NodeRequest {
    /// Open a session for one join attempt.
    OpenSession,
    /// Size the session filter.
    ConfigureFilter {
        session: SessionId,
        slot_count: u64,
        hash_count: u64,
    },
    /// Bind the originator's drawn coefficients, in order.
    BindHashFunctions {
        session: SessionId,
        coefficients: Vec<(u64, u64)>,
    },
    /// Scan locally and add matching keys to the session filter.
    PopulateFromPredicate {
        session: SessionId,
        predicate: Predicate,
    },
    /// Ship back the populated bit vector.
    ExportFilterVector { session: SessionId },
    /// Load the sender's bits and return candidate rows.
    ResolveByVector {
        session: SessionId,
        vector: FilterVector,
    },
    /// Unfiltered baseline query.
    QueryByPredicate { predicate: Predicate },
    /// Discard the session.
    CloseSession { session: SessionId },
}
