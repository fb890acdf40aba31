//! Custom error types for the attendance service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the attendance service.
///
/// Every failure surfaces as a distinct structured outcome so the routing
/// layer can map it; a check-in that fails here never produces a status.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// Required fields are missing or malformed; carries the field names
    #[error("Validation failed for fields: {0:?}")]
    Validation(Vec<String>),

    /// Actor lacks the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad login credentials
    #[error("Invalid credentials")]
    Unauthorized,

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// QR encoding failure
    #[error("QR encoding error: {0}")]
    Encoding(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for AttendanceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AttendanceError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Missing or invalid fields",
                    "fields": fields,
                }),
            ),
            AttendanceError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AttendanceError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid credentials" }),
            ),
            AttendanceError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AttendanceError::Encoding(msg) => {
                tracing::error!("QR encoding failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "QR encoding failed" }),
                )
            }
            AttendanceError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for attendance results
pub type AttendanceResult<T> = Result<T, AttendanceError>;
