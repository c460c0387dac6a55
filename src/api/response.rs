//! Response types for the HR ledger API.
//!
//! This module defines the error body returned by every endpoint, the mapping
//! from [`EngineError`] to HTTP status, and the composite response bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AttendanceRecord, AttendanceSummary, PayrollRecord};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details("NOT_FOUND", message, format!("No {} with key {}", entity, id)),
            ),
            EngineError::Conflict { .. } => (StatusCode::CONFLICT, ApiError::new("CONFLICT", message)),
            EngineError::ValidationError { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("VALIDATION_ERROR", message, format!("field: {}", field)),
            ),
            EngineError::InsufficientBalance { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("INSUFFICIENT_BALANCE", message),
            ),
            EngineError::InvalidState { .. } => {
                (StatusCode::CONFLICT, ApiError::new("INVALID_STATE", message))
            }
            EngineError::AlreadyProcessed { .. } => {
                (StatusCode::CONFLICT, ApiError::new("ALREADY_PROCESSED", message))
            }
            EngineError::StorageError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::RenderError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("RENDER_ERROR", "Slip rendering failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Body of `GET /attendance/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Every record in the range, most recent first.
    pub records: Vec<AttendanceRecord>,
    /// Per-employee aggregates over `records`.
    pub summaries: Vec<AttendanceSummary>,
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPayroll {
    /// Number of records created by this call.
    pub created_count: usize,
    /// The newly created records. Existing records for the period are omitted.
    pub records: Vec<PayrollRecord>,
}
