//! Port traits (interfaces) for the persistence collaborator

pub mod storage;

pub use storage::EmployeeStore;
