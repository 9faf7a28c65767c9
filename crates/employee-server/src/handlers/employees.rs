//! Employee handlers

use super::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use employee_core::{Employee, EmployeePayload};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    deleted: bool,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, StatusCode> {
    match state.employee_service.list_employees().await {
        Ok(employees) => Ok(Json(employees)),
        Err(e) => {
            tracing::error!("Failed to list employees: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.employee_service.get_employee(id).await?;
    Ok(Json(employee))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.employee_service.create_employee(payload).await?;
    Ok(Json(employee))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, ApiError> {
    let employee = state.employee_service.update_employee(id, payload).await?;
    Ok(Json(employee))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.employee_service.delete_employee(id).await?;
    Ok(Json(DeleteResponse { deleted: true }))
}

pub async fn delete_all(State(state): State<AppState>) -> StatusCode {
    match state.employee_service.delete_all_employees().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to delete all employees: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
