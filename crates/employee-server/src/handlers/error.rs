//! Boundary error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use employee_core::EmployeeError;
use serde_json::json;

/// Error response for handlers that let failures propagate
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": self.status.as_u16(),
            "error": self.status.canonical_reason().unwrap_or("Error"),
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::NotFound(_) => ApiError {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            other => {
                // Store details stay in the log
                tracing::error!("Request failed: {}", other);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal Server Error".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_message() {
        let err = ApiError::from(EmployeeError::NotFound(1));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Employee not found for this id : 1");
    }

    #[test]
    fn store_failure_maps_to_generic_500() {
        let err = ApiError::from(EmployeeError::Database("database is locked".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("locked"));
    }
}
