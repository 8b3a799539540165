//! Support tickets stored in SQLite

use crate::error::AppError;
use crate::tools::{NewTicket, TicketStore};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Lifecycle state of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly opened, awaiting an agent
    Open,
    /// An agent is working on it
    InProgress,
    /// Resolved
    Closed,
    /// Waiting on the customer or a third party
    Pending,
}

impl TicketStatus {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
            TicketStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            "pending" => Ok(TicketStatus::Pending),
            other => Err(AppError::InvalidRequest(format!(
                "invalid ticket status '{}', expected one of open, in_progress, closed, pending",
                other
            ))),
        }
    }
}

/// A stored ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Ticket id
    pub id: i64,
    /// Customer's name
    pub customer_name: String,
    /// Customer's email address
    pub customer_email: String,
    /// Short summary
    pub subject: String,
    /// Description
    pub body: String,
    /// One of open, in_progress, closed, pending
    pub status: String,
    /// One of low, medium, high, urgent
    pub priority: String,
    /// When the ticket was opened (Unix timestamp)
    pub created_at: i64,
    /// When the ticket last changed (Unix timestamp)
    pub updated_at: i64,
}

/// [`TicketStore`] over the `tickets` table
#[derive(Debug, Clone)]
pub struct SqliteTicketStore {
    pool: SqlitePool,
}

impl SqliteTicketStore {
    /// Wrap an open pool; the schema must already exist
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a ticket, returning its id
    ///
    /// Fields are trimmed. `Ok(None)` when name, email or subject is blank.
    pub async fn insert(&self, ticket: &NewTicket) -> Result<Option<i64>, AppError> {
        let name = ticket.customer_name.trim();
        let email = ticket.customer_email.trim();
        let subject = ticket.subject.trim();
        if name.is_empty() || email.is_empty() || subject.is_empty() {
            debug!("Missing required fields for ticket creation");
            return Ok(None);
        }

        let now = Utc::now().timestamp();
        let result = sqlx::query(
            "INSERT INTO tickets (customer_name, customer_email, subject, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(ticket.body.trim())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(ticket_id = id, "Created support ticket");
        Ok(Some(id))
    }

    /// Fetch one ticket by id
    pub async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            "SELECT id, customer_name, customer_email, subject, body, status, priority, created_at, updated_at FROM tickets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ticket)
    }

    /// Open tickets, newest first
    pub async fn list_open_tickets(&self) -> Result<Vec<Ticket>, AppError> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT id, customer_name, customer_email, subject, body, status, priority, created_at, updated_at FROM tickets WHERE status = 'open' ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    /// Set a ticket's status; `Ok(false)` when no such ticket exists
    pub async fn update_ticket_status(
        &self,
        id: i64,
        status: TicketStatus,
    ) -> Result<bool, AppError> {
        let updated_at = Utc::now().timestamp();
        let result = sqlx::query("UPDATE tickets SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        let changed = result.rows_affected() > 0;
        if changed {
            info!(ticket_id = id, status = %status, "Updated ticket status");
        }
        Ok(changed)
    }
}

#[async_trait]
impl TicketStore for SqliteTicketStore {
    async fn create_ticket(&self, ticket: &NewTicket) -> Option<i64> {
        match self.insert(ticket).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Ticket creation failed");
                None
            }
        }
    }
}
