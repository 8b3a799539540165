//! Orchestrator constants
//!
//! Centralized constants used throughout the orchestrator module.

/// Trace action name recorded for the synthesized reply
pub const SYNTHESIZE_ACTION: &str = "synthesize_reply";

/// `top_k` used by `search_kb` when the step does not supply one
pub const DEFAULT_TOP_K: usize = 5;

/// Upper bound on `top_k` for any knowledge-base search
pub const MAX_TOP_K: usize = 20;

/// Placeholder for absent `customer_name` / `customer_email` ticket arguments
pub const UNKNOWN_CUSTOMER: &str = "unknown";

/// Placeholder for an absent ticket `subject`
pub const NO_SUBJECT: &str = "no-subject";

/// Trace action name used when the planner omitted the action entirely
pub const MISSING_ACTION: &str = "unknown";
