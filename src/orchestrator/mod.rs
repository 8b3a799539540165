//! Orchestrator module
//!
//! Turns one customer message into a reply:
//!
//! - [`planner`] asks the model for a plan and decodes it
//! - [`validator`] types and bounds the plan
//! - [`executor`] runs each step against the tools and records a trace
//! - [`synthesizer`] writes the reply from the trace when no step did
//!
//! [`agent::SupportAgent`] wires the stages together.

pub mod agent;
pub mod api_client;
pub mod config;
pub mod constants;
pub mod executor;
pub mod gemini_types;
pub mod generator;
pub mod plan_types;
pub mod planner;
pub mod registry;
pub mod synthesizer;
pub mod utils;
pub mod validator;

pub use agent::SupportAgent;
pub use generator::{ResponseFormat, TextGenerator};
pub use plan_types::{ExecutionResult, Metadata, TraceEntry};
