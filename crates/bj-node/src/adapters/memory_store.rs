//! In-memory relation store.
//!
//! Backs a node with plain vectors of rows. The runtime seeds it with
//! fixture data; tests seed it with whatever the scenario needs. Either way
//! the store arrives as an injected capability, never as ambient state.

use async_trait::async_trait;

use shared_types::{Employee, JoinKey, JoinRow, Keyed, Predicate, Salary};

use crate::error::StoreError;
use crate::ports::RelationStore;

/// A node's relation held in memory.
#[derive(Default)]
pub struct MemoryStore {
    employees: Vec<Employee>,
    salaries: Vec<Salary>,
}

impl MemoryStore {
    /// A store holding an employee relation.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees,
            salaries: Vec::new(),
        }
    }

    /// A store holding a salary relation.
    pub fn with_salaries(salaries: Vec<Salary>) -> Self {
        Self {
            employees: Vec::new(),
            salaries,
        }
    }

    fn rows(&self) -> impl Iterator<Item = JoinRow> + '_ {
        self.employees
            .iter()
            .cloned()
            .map(JoinRow::Employee)
            .chain(self.salaries.iter().cloned().map(JoinRow::Salary))
    }
}

#[async_trait]
impl RelationStore for MemoryStore {
    async fn scan(&self, predicate: &Predicate) -> Result<Vec<JoinRow>, StoreError> {
        let rows = match predicate {
            Predicate::FirstNameIs(name) => self
                .employees
                .iter()
                .filter(|e| &e.first_name == name)
                .cloned()
                .map(JoinRow::Employee)
                .collect(),
            Predicate::SalaryAbove(amount) => self
                .salaries
                .iter()
                .filter(|s| s.amount > *amount)
                .cloned()
                .map(JoinRow::Salary)
                .collect(),
        };
        Ok(rows)
    }

    async fn all_keys(&self) -> Result<Vec<JoinKey>, StoreError> {
        Ok(self.rows().map(|row| row.join_key()).collect())
    }

    async fn fetch_by_key(&self, key: JoinKey) -> Result<Vec<JoinRow>, StoreError> {
        Ok(self.rows().filter(|row| row.join_key() == key).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_types::Gender;

    fn employee(emp_no: &str, first_name: &str) -> Employee {
        Employee {
            emp_no: emp_no.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1960, 1, 1).unwrap(),
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            gender: Gender::F,
            hire_date: NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_scan_matches_employees_by_first_name() {
        let store = MemoryStore::with_employees(vec![
            employee("12", "Mary"),
            employee("55", "Mary"),
            employee("60", "Georgi"),
        ]);

        let rows = store
            .scan(&Predicate::FirstNameIs("Mary".to_string()))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_salary_predicate_on_employee_store_matches_nothing() {
        let store = MemoryStore::with_employees(vec![employee("12", "Mary")]);

        let rows = store.scan(&Predicate::SalaryAbove(1)).await.unwrap();

        assert!(
            rows.is_empty(),
            "A store without the relation answers with no rows"
        );
    }

    #[tokio::test]
    async fn test_fetch_by_key_returns_only_matching_rows() {
        let store = MemoryStore::with_employees(vec![
            employee("12", "Mary"),
            employee("55", "Anneke"),
        ]);

        let rows = store.fetch_by_key(55).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].join_key(), 55);

        assert!(store.fetch_by_key(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_keys_covers_the_relation() {
        let store = MemoryStore::with_employees(vec![
            employee("12", "Mary"),
            employee("55", "Anneke"),
        ]);

        let mut keys = store.all_keys().await.unwrap();
        keys.sort_unstable();
        assert_eq!(keys, vec![12, 55]);
    }
}
