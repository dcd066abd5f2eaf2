//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Session and validation errors map to HTTP status codes with a JSON body
//! `{"error": {"code", "message", "details"?}}`. Ledger failure detail is
//! logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hg_client::MintRejection;

use crate::session::SessionError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "MINT_FAILED").
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The pet's stored state cannot be advanced (422).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The ledger refused or failed to confirm a mint (502).
    #[error("{}", reason.message())]
    MintFailed { reason: MintRejection },
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::InvalidState(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_STATE"),
            Self::MintFailed { .. } => (StatusCode::BAD_GATEWAY, "MINT_FAILED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = self.to_string();

        let details = match &self {
            Self::MintFailed { reason } => Some(serde_json::json!({ "reason": reason })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<hg_core::ValidationError> for AppError {
    fn from(err: hg_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => Self::NotFound(format!("pet {id} not found")),
            SessionError::InvalidState(e) => Self::InvalidState(e.to_string()),
            SessionError::MintFailed { reason, detail } => {
                tracing::warn!(%reason, %detail, "mint failed");
                Self::MintFailed { reason }
            }
        }
    }
}
