//! Application error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, AppError>`. Errors are rendered as
//! `{"error": "<message>"}` with an optional `details` object carrying
//! field-level validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::storage::StorageError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

/// Errors surfaced by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client input was rejected (400).
    #[error("{message}")]
    Validation { message: String, details: Value },
    /// The addressed record does not exist (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },
    /// The record exists but its stored content is gone (410).
    #[error("{message}")]
    Gone { message: String, details: Value },
    /// The request body exceeded the configured upload limit (413).
    #[error("{message}")]
    PayloadTooLarge { message: String, details: Value },
    /// Database or storage failure (500). `details` is logged, never returned.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn payload_too_large(message: impl Into<String>, details: Value) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Gone { .. } => StatusCode::GONE,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error, details) = match self {
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed with internal error");
                ("Internal server error".to_string(), Value::Null)
            }
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Gone { message, details }
            | AppError::PayloadTooLarge { message, details } => (message, details),
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::not_found("Not found", Value::Null),
            e => {
                if let Some(db) = e.as_database_error()
                    && db.is_check_violation()
                {
                    return AppError::bad_request(
                        "Constraint violation",
                        json!({ "constraint": db.constraint() }),
                    );
                }
                AppError::internal("Database error", json!({ "reason": e.to_string() }))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or(Value::Null);
        AppError::bad_request("Validation failed", details)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::internal("Storage error", json!({ "reason": e.to_string() }))
    }
}
