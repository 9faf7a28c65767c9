//! Employee Core Library
//!
//! Domain errors and the storage port for the employee service.

// Re-export pure types from employee-types
pub use employee_types::*;

pub mod error;
pub mod ports;

pub use error::{EmployeeError, Result};
pub use ports::EmployeeStore;
