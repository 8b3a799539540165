//! Health endpoints

use crate::error::AppError;
use crate::state::SharedState;
use axum::{extract::State, response::Json};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the check passed
    pub status: String,
    /// Service version
    pub version: String,
    /// Human-readable detail
    pub message: String,
}

impl HealthResponse {
    fn healthy(message: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            message: message.to_string(),
        }
    }
}

/// GET / - Liveness
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("Customer Service Agent is running"))
}

/// GET /health - Readiness; 503 when the database does not answer
pub async fn health_check(
    State(state): State<SharedState>,
) -> Result<Json<HealthResponse>, AppError> {
    state.database.ping().await?;
    Ok(Json(HealthResponse::healthy("All systems operational")))
}
