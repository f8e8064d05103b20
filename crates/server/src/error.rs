//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use strata_core::{Retrieval, StatusRecord};
use strata_pacs::PacsError;
use strata_status::StatusError;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Hint on how to resolve the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Current study status, present when the access gate refused a retrieval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusRecord>,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The study's tier does not allow the requested retrieval.
    #[error("{} not available (Study status: {})", .retrieval.artifact(), .status.tier)]
    PreconditionFailed {
        retrieval: Retrieval,
        status: StatusRecord,
    },

    #[error("status store error: {0}")]
    Status(#[from] StatusError),

    #[error("PACS error: {0}")]
    Pacs(#[from] PacsError),

    #[error("invalid request: {0}")]
    Core(#[from] strata_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::PreconditionFailed { .. } => "precondition_failed",
            Self::Status(_) => "status_store_error",
            Self::Pacs(e) => match e {
                PacsError::NotFound(_) => "not_found",
                PacsError::InvalidRequest(_) => "bad_request",
                e if e.is_timeout() => "gateway_timeout",
                _ => "bad_gateway",
            },
            Self::Core(_) => "bad_request",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PreconditionFailed { .. } => StatusCode::PRECONDITION_FAILED,
            Self::Status(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Pacs(e) => match e {
                PacsError::NotFound(_) => StatusCode::NOT_FOUND,
                PacsError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                e if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.code().to_string();
        let message = self.to_string();
        let body = match self {
            Self::PreconditionFailed { status, .. } => ErrorResponse {
                code,
                message,
                details: Some("Move study to hot tier to enable retrieval".to_string()),
                status: Some(status),
            },
            _ => ErrorResponse {
                code,
                message,
                details: None,
                status: None,
            },
        };
        (status_code, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
