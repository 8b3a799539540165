//! Customer message endpoint

use crate::api::utils::{validate_customer_email, validate_customer_name, validate_message_text};
use crate::error::AppError;
use crate::orchestrator::{Metadata, TraceEntry};
use crate::state::SharedState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

/// Incoming customer message
#[derive(Debug, Clone, Deserialize)]
pub struct MessageIn {
    /// Message text
    pub text: String,
    /// Customer's name
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Customer's email address
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Opaque session identifier, echoed back
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Agent reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageOut {
    /// Customer-facing reply
    pub reply: String,
    /// Audit log of the request
    pub trace: Vec<TraceEntry>,
    /// Session identifier from the request
    pub session_id: Option<String>,
}

/// POST /message - Answer a customer message
pub async fn post_message(
    State(state): State<SharedState>,
    Json(request): Json<MessageIn>,
) -> Result<Json<MessageOut>, AppError> {
    let text = validate_message_text(
        &request.text,
        state.config.orchestrator.max_message_length,
    )?;
    let metadata = Metadata {
        customer_name: validate_customer_name(request.customer_name.as_deref())?,
        customer_email: validate_customer_email(request.customer_email.as_deref())?,
        session_id: request.session_id.clone(),
    };

    let result = state.agent.handle(text, &metadata).await?;

    Ok(Json(MessageOut {
        reply: result.final_text,
        trace: result.trace,
        session_id: request.session_id,
    }))
}
