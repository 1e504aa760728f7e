//! Error types for Lendbook server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes surfaced in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 3,
    Duplicate = 8,
    BadValue = 18,
    NoSuchData = 20,
    BusinessRule = 22,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload or query string rejected before any storage access
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stock invariant, date ordering, unknown or still-referenced rows
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Uniqueness violation reported by storage
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Map a write error, turning a uniqueness violation into `Duplicate(message)`.
    ///
    /// Primary key collisions are uniqueness violations too, so a reused id and a
    /// reused username (or email, or book name) yield the same message.
    pub fn on_unique_violation(err: sqlx::Error, message: &str) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());
        if unique {
            return AppError::Duplicate(message.to_string());
        }
        AppError::Database(err)
    }

    /// Map a delete error, turning a foreign key violation into a business rule error.
    pub fn on_foreign_key_violation(err: sqlx::Error, message: &str) -> Self {
        let referenced = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_foreign_key_violation());
        if referenced {
            return AppError::BusinessRule(message.to_string());
        }
        AppError::Database(err)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::BusinessRule(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BusinessRule, msg.clone())
            }
            AppError::Duplicate(msg) => (StatusCode::BAD_REQUEST, ErrorCode::Duplicate, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
