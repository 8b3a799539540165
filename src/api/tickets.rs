//! Ticket API handlers
//!
//! Direct access to the ticket store for support staff, outside the agent.

use crate::error::AppError;
use crate::state::SharedState;
use crate::tools::tickets::{Ticket, TicketStatus};
use crate::tools::NewTicket;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

/// Open tickets
#[derive(Debug, Serialize)]
pub struct TicketsListResponse {
    /// Open tickets, newest first
    pub tickets: Vec<Ticket>,
    /// Number of tickets returned
    pub count: usize,
}

/// Create ticket request; absent fields take placeholder values
#[derive(Debug, Default, Deserialize)]
pub struct CreateTicketRequest {
    /// Customer's name
    pub customer_name: Option<String>,
    /// Customer's email address
    pub customer_email: Option<String>,
    /// Short summary
    pub subject: Option<String>,
    /// Description
    pub body: Option<String>,
}

/// Created-ticket acknowledgement
#[derive(Debug, Serialize)]
pub struct TicketCreatedResponse {
    /// New ticket id
    pub ticket_id: i64,
    /// Always "created"
    pub status: String,
}

/// Update ticket request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketRequest {
    /// New status
    pub status: Option<String>,
}

/// Updated-ticket acknowledgement
#[derive(Debug, Serialize)]
pub struct TicketUpdatedResponse {
    /// Ticket id
    pub ticket_id: i64,
    /// Status now stored
    pub status: TicketStatus,
    /// Always true
    pub updated: bool,
}

/// GET /tickets - List open tickets
pub async fn list_tickets(
    State(state): State<SharedState>,
) -> Result<Json<TicketsListResponse>, AppError> {
    let tickets = state.tickets.list_open_tickets().await?;
    let count = tickets.len();
    Ok(Json(TicketsListResponse { tickets, count }))
}

/// POST /tickets - Create a ticket
pub async fn create_ticket(
    State(state): State<SharedState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<TicketCreatedResponse>), AppError> {
    let ticket = NewTicket {
        customer_name: request.customer_name.unwrap_or_else(|| "Unknown".to_string()),
        customer_email: request.customer_email.unwrap_or_default(),
        subject: request.subject.unwrap_or_else(|| "No Subject".to_string()),
        body: request.body.unwrap_or_default(),
    };

    let ticket_id = state.tickets.insert(&ticket).await?.ok_or_else(|| {
        AppError::InvalidRequest(
            "customer_name, customer_email and subject are required".to_string(),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(TicketCreatedResponse {
            ticket_id,
            status: "created".to_string(),
        }),
    ))
}

/// GET /tickets/:id - Fetch one ticket
pub async fn get_ticket(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Ticket>, AppError> {
    let ticket = state
        .tickets
        .get_ticket(id)
        .await?
        .ok_or(AppError::TicketNotFound(id))?;
    Ok(Json(ticket))
}

/// PUT /tickets/:id - Change a ticket's status
pub async fn update_ticket(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTicketRequest>,
) -> Result<Json<TicketUpdatedResponse>, AppError> {
    let status: TicketStatus = request
        .status
        .as_deref()
        .ok_or_else(|| AppError::InvalidRequest("Status is required".to_string()))?
        .parse()?;

    if !state.tickets.update_ticket_status(id, status).await? {
        return Err(AppError::TicketNotFound(id));
    }

    Ok(Json(TicketUpdatedResponse {
        ticket_id: id,
        status,
        updated: true,
    }))
}
