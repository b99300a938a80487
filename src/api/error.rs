use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use uuid::Uuid;

use crate::logic::FieldViolation;

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            error: message.to_string(),
            errors: None,
        }
    }

    pub fn with_violations(message: &str, violations: Vec<FieldViolation>) -> Self {
        Self {
            errors: Some(violations),
            ..Self::new(message)
        }
    }
}

/// Failures a handler can end in. Only the summary line of each variant's
/// response is client-visible; the `Display` text is for the server log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldViolation>),
    #[error("Loan not found: {0}")]
    NotFound(Uuid),
    #[error("Type mismatch for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error("Loan {0} was modified concurrently")]
    Conflict(Uuid),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(violations) => {
                log::warn!("Validation failed: {:?}", violations);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_violations("Validation failed", violations),
                )
            }
            ApiError::NotFound(id) => {
                log::warn!("Resource not found: loan {}", id);
                (StatusCode::NOT_FOUND, ErrorResponse::new("Resource not found"))
            }
            ApiError::InvalidParameter { name, value } => {
                log::warn!("Type mismatch for parameter '{}': {}", name, value);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Invalid parameter format"),
                )
            }
            ApiError::Conflict(id) => {
                log::warn!("Concurrent modification of loan {}", id);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Resource was modified concurrently"),
                )
            }
            ApiError::Internal(e) => {
                log::error!("Unexpected error occurred: {:#}", e);
                internal_error()
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new("An unexpected error occurred"),
    )
}

/// Response for a handler that panicked; the panic payload is only logged.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    log::error!("Unexpected error occurred: handler panicked: {}", detail);

    let (status, body) = internal_error();
    (status, Json(body)).into_response()
}
