//! Scan predicates.
//!
//! The predicate travels to whichever node runs the scan, so it is a closed
//! wire-visible enum rather than an arbitrary closure.

use serde::{Deserialize, Serialize};

/// A predicate a node evaluates against its local relation.
///
/// Each store interprets the variants that apply to its relation and returns
/// no rows for the others; the caller must not assume a variant matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Employees whose first name equals the given value.
    FirstNameIs(String),
    /// Salary rows whose amount is strictly greater than the given value.
    SalaryAbove(i64),
}
