//! Customer Support Agent
//!
//! Plans, executes and synthesizes answers to customer messages using a
//! language model, a full-text knowledge base, a ticket store and an HTTP
//! fetch tool. The server binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod orchestrator;
/// Application state shared by the HTTP handlers
pub mod state;
pub mod tools;
