//! Error types and handling for the relay server.
//!
//! This module provides a unified error type [`AppError`] that wraps various
//! error sources and implements proper HTTP response conversion.
//!
//! Upstream HTTP error *statuses* are intentionally not represented here:
//! they are relayed to the caller verbatim. Only local rejections and
//! transport-level failures become an `AppError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing env vars, parse errors, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Inbound chat payload is missing, unparseable, or not a JSON object.
    /// Short-circuits before any upstream call.
    #[error("Invalid JSON")]
    InvalidPayload,

    /// Transport failure talking to the upstream (connect refused, broken
    /// connection before response headers, timeout)
    #[error("Upstream request error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Catch-all received a method the relay does not forward
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Config(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::InvalidPayload => (StatusCode::BAD_REQUEST, "Invalid JSON".to_string()),
            AppError::Upstream(e) => {
                if e.is_timeout() {
                    (StatusCode::GATEWAY_TIMEOUT, "Upstream timeout".to_string())
                } else {
                    (StatusCode::BAD_GATEWAY, format!("Upstream request error: {}", e))
                }
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, message).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
