//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use employee_types::{Employee, EmployeePayload};

/// Employee store
///
/// Each call is expected to be atomic on its own. Callers compose
/// "look up, then mutate" sequences without a surrounding transaction.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All records in insertion order
    async fn find_all(&self) -> Result<Vec<Employee>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>>;
    /// Persist a new record; the store assigns the id
    async fn insert(&self, payload: &EmployeePayload) -> Result<Employee>;
    /// Persist an existing record. Fails with `NotFound` if the id is gone.
    async fn update(&self, employee: &Employee) -> Result<Employee>;
    async fn delete_by_id(&self, id: i64) -> Result<()>;
    async fn delete_all(&self) -> Result<()>;
}
