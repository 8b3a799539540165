//! API module
//!
//! HTTP request handlers and the router that mounts them.

pub mod health;
pub mod kb;
pub mod message;
pub mod middleware;
pub mod tickets;
pub mod utils;

use crate::state::SharedState;
use axum::{
    routing::{get, post},
    Router,
};

/// All routes, with state attached
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/message", post(message::post_message))
        .route("/kb", post(kb::add_kb_entry))
        .route("/kb/search", get(kb::search_kb))
        .route(
            "/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(tickets::get_ticket).put(tickets::update_ticket),
        )
        .with_state(state)
}
