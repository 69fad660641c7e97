//! # Relation Record Schemas
//!
//! The flat records a node ships over the channel. Field order is part of the
//! wire contract: the encoding is positional, so reordering a field is a
//! breaking protocol change.
//!
//! The core treats these as opaque carriers of a join key; only the stores
//! and the final joined projection look at the other fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::key::{canonical_key, JoinKey};

/// Anything that carries a join key.
pub trait Keyed {
    /// The canonical integer key this row joins on.
    fn join_key(&self) -> JoinKey;
}

/// Employee gender marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

/// An employee row, keyed by employee number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee number (the join key).
    pub emp_no: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender marker.
    pub gender: Gender,
    /// Date of hire.
    pub hire_date: NaiveDate,
}

/// A salary row, keyed by employee number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    /// Employee number (the join key).
    pub emp_no: String,
    /// Salary amount in base currency units.
    pub amount: i64,
    /// Start of the validity period.
    pub from_date: NaiveDate,
    /// End of the validity period.
    pub to_date: NaiveDate,
}

/// The joined projection of an employee and one of their salary rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedEmployee {
    /// Employee number both sides joined on.
    pub emp_no: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender marker.
    pub gender: Gender,
    /// Date of hire.
    pub hire_date: NaiveDate,
    /// Salary amount.
    pub amount: i64,
    /// Start of the salary validity period.
    pub from_date: NaiveDate,
    /// End of the salary validity period.
    pub to_date: NaiveDate,
}

impl JoinedEmployee {
    /// Merge an employee row with one of its salary rows.
    pub fn from_parts(employee: &Employee, salary: &Salary) -> Self {
        Self {
            emp_no: employee.emp_no.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            gender: employee.gender,
            hire_date: employee.hire_date,
            amount: salary.amount,
            from_date: salary.from_date,
            to_date: salary.to_date,
        }
    }
}

/// A row as it travels on the wire: one variant per relation.
///
/// The enum tag is part of the wire contract; new relations append variants,
/// they never reorder existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JoinRow {
    Employee(Employee),
    Salary(Salary),
}

impl Keyed for Employee {
    fn join_key(&self) -> JoinKey {
        canonical_key(&self.emp_no)
    }
}

impl Keyed for Salary {
    fn join_key(&self) -> JoinKey {
        canonical_key(&self.emp_no)
    }
}

impl Keyed for JoinRow {
    fn join_key(&self) -> JoinKey {
        match self {
            JoinRow::Employee(e) => e.join_key(),
            JoinRow::Salary(s) => s.join_key(),
        }
    }
}
