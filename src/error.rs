//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Per-step tool failures never surface here: the tools fold them into their
/// result payloads. What remains are request errors, the two fatal model
/// stages (planning and synthesis) and infrastructure failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body or query failed validation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Ticket with the given ID was not found
    #[error("Ticket not found: {0}")]
    TicketNotFound(i64),

    /// Planner call failed or its output could not be decoded
    #[error("Planning failed: {0}")]
    PlanningFailed(String),

    /// Reply synthesis call failed or produced no text
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Error reported by the SQLite store
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A dependency needed to serve the request is not reachable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TicketNotFound(_) => StatusCode::NOT_FOUND,
            AppError::PlanningFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SynthesisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
