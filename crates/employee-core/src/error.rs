//! Error types for employee management

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmployeeError>;

#[derive(Error, Debug)]
pub enum EmployeeError {
    #[error("Employee not found for this id : {0}")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EmployeeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EmployeeError::NotFound(_))
    }
}

impl From<serde_json::Error> for EmployeeError {
    fn from(e: serde_json::Error) -> Self {
        EmployeeError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_embeds_id() {
        let err = EmployeeError::NotFound(42);
        assert_eq!(err.to_string(), "Employee not found for this id : 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn database_error_is_not_not_found() {
        let err = EmployeeError::Database("disk I/O error".into());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Database error: disk I/O error");
    }
}
