//! Orchestrator utility functions
//!
//! Hashing helpers that let log lines identify a message or plan without
//! writing customer text into the logs.

use crate::orchestrator::plan_types::PlanStep;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Compute a short hash for a customer message
///
/// Returns an 8-character hexadecimal hash suitable for logging and tracing.
pub fn hash_message(message: &str) -> String {
    let mut hasher = DefaultHasher::new();
    message.hash(&mut hasher);
    format!("{:016x}", hasher.finish())[..8].to_string()
}

/// Compute a short hash for a validated plan
///
/// Based on the step count and each step's action name.
pub fn hash_plan(steps: &[PlanStep]) -> String {
    let mut hasher = DefaultHasher::new();
    steps.len().hash(&mut hasher);
    for step in steps {
        step.action.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())[..8].to_string()
}
