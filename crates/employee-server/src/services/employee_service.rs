//! Employee service: store access with read-through caching
//!
//! Cache policy per operation:
//! - list: read-through on `employees:all`
//! - get: read-through on `employee:{id}`
//! - update: write-through on `employee:{id}`
//! - delete: evict `employee:{id}`
//! - delete all: evict every `employee:*` entry
//!
//! Every mutation also evicts `employees:all`, so a cached list never
//! outlives a change to the table.
//!
//! Values loaded from the store are cached only if no invalidation ran
//! while the store call was in flight (see `MemoryCache::generation`).

use crate::storage::MemoryCache;
use employee_core::{Employee, EmployeeError, EmployeePayload, EmployeeStore, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const ALL_EMPLOYEES_KEY: &str = "employees:all";
const EMPLOYEE_KEY_PREFIX: &str = "employee:";

fn employee_key(id: i64) -> String {
    format!("{}{}", EMPLOYEE_KEY_PREFIX, id)
}

pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    cache: Arc<MemoryCache>,
    cache_ttl: Option<Duration>,
}

impl EmployeeService {
    pub fn new(
        store: Arc<dyn EmployeeStore>,
        cache: Arc<MemoryCache>,
        cache_ttl: Option<Duration>,
    ) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
        }
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        if let Some(employees) = self.cache_get::<Vec<Employee>>(ALL_EMPLOYEES_KEY) {
            debug!("Cache hit: {} employees", employees.len());
            return Ok(employees);
        }

        let seen = self.cache.generation();
        let employees = self.store.find_all().await?;
        self.cache_put(ALL_EMPLOYEES_KEY.to_string(), &employees, seen)?;

        Ok(employees)
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee> {
        let key = employee_key(id);
        if let Some(employee) = self.cache_get::<Employee>(&key) {
            debug!("Cache hit: employee {}", id);
            return Ok(employee);
        }

        let seen = self.cache.generation();
        let employee = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;
        self.cache_put(key, &employee, seen)?;

        Ok(employee)
    }

    pub async fn create_employee(&self, payload: EmployeePayload) -> Result<Employee> {
        let employee = self.store.insert(&payload).await?;
        info!("Created employee {}", employee.id);

        self.cache.delete(ALL_EMPLOYEES_KEY);

        Ok(employee)
    }

    pub async fn update_employee(&self, id: i64, payload: EmployeePayload) -> Result<Employee> {
        let mut employee = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        employee.apply(payload);
        let seen = self.cache.generation();
        let updated = self.store.update(&employee).await?;
        info!("Updated employee {}", id);

        let key = employee_key(id);
        // A concurrent mutation may have written a newer value or removed
        // the row; drop the entry instead of guessing which one won.
        if !self.cache_put(key.clone(), &updated, seen)? {
            self.cache.delete(&key);
        }
        self.cache.delete(ALL_EMPLOYEES_KEY);

        Ok(updated)
    }

    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(EmployeeError::NotFound(id));
        }

        self.store.delete_by_id(id).await?;
        info!("Deleted employee {}", id);

        self.cache.delete(&employee_key(id));
        self.cache.delete(ALL_EMPLOYEES_KEY);

        Ok(())
    }

    pub async fn delete_all_employees(&self) -> Result<()> {
        self.store.delete_all().await?;
        info!("Deleted all employees");

        self.cache.delete_prefix(EMPLOYEE_KEY_PREFIX);
        self.cache.delete(ALL_EMPLOYEES_KEY);

        Ok(())
    }

    /// Undecodable entries count as a miss
    fn cache_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.cache.get(key)?;
        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Discarding undecodable cache entry {}: {}", key, e);
                self.cache.delete(key);
                None
            }
        }
    }

    /// Returns whether the value was stored
    fn cache_put<T: Serialize>(&self, key: String, value: &T, seen: u64) -> Result<bool> {
        let data = serde_json::to_vec(value)?;
        let stored = self
            .cache
            .set_if_unchanged(key.clone(), data, self.cache_ttl, seen);
        if !stored {
            debug!("Skipped caching {}: invalidated during load", key);
        }
        Ok(stored)
    }
}
