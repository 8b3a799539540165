//! Tool collaborators
//!
//! The three side-effecting or read-only operations a plan can invoke. Each is
//! a narrow trait so the executor can run against SQLite and reqwest in
//! production and against in-memory fakes in tests.
//!
//! None of them return errors: failures are folded into the result shape
//! (empty list, `None`, `success: false`) and logged where they happen.

pub mod http;
pub mod kb;
pub mod tickets;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::sync::Arc;

pub use http::HttpTool;
pub use kb::SqliteKnowledgeBase;
pub use tickets::SqliteTicketStore;

/// One knowledge-base search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct KbArticle {
    /// Article title
    pub title: String,
    /// Article body
    pub content: String,
}

/// Fields for a new support ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    /// Customer's name
    pub customer_name: String,
    /// Customer's email address
    pub customer_email: String,
    /// Short summary of the issue
    pub subject: String,
    /// Description of the issue
    pub body: String,
}

/// Outcome of an `http_get` call, recorded verbatim in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpGetResult {
    /// Whether a response was received (any status code)
    pub success: bool,
    /// HTTP status, 0 when no response was received
    pub status_code: u16,
    /// Response body, truncated
    pub text: String,
    /// Response headers, empty when no response was received
    pub headers: BTreeMap<String, String>,
    /// Failure description, `None` on success
    pub error: Option<String>,
}

impl HttpGetResult {
    /// A failed call with the given error text
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            status_code: 0,
            text: String::new(),
            headers: BTreeMap::new(),
            error: Some(error.into()),
        }
    }
}

/// Full-text search over support articles
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// At most `top_k` articles in relevance order; empty on no match or error
    async fn search(&self, query: &str, top_k: usize) -> Vec<KbArticle>;
}

/// Support ticket creation
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// New ticket id, or `None` when required fields are missing or the store fails
    async fn create_ticket(&self, ticket: &NewTicket) -> Option<i64>;
}

/// Outbound HTTP fetches
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET `url`; never errors, see [`HttpGetResult`]
    async fn get(&self, url: &str) -> HttpGetResult;
}

/// The collaborators a plan executes against
#[derive(Clone)]
pub struct Toolbox {
    /// Knowledge base used by `search_kb`
    pub kb: Arc<dyn KnowledgeBase>,
    /// Ticket store used by `create_ticket`
    pub tickets: Arc<dyn TicketStore>,
    /// Fetcher used by `http_get`
    pub http: Arc<dyn HttpFetcher>,
}

impl Toolbox {
    /// Bundle the three collaborators
    pub fn new(
        kb: Arc<dyn KnowledgeBase>,
        tickets: Arc<dyn TicketStore>,
        http: Arc<dyn HttpFetcher>,
    ) -> Self {
        Self { kb, tickets, http }
    }
}
