//! Planner
//!
//! Sends the customer message and the tool registry to the model and decodes
//! the reply into a [`RawPlan`]. The model is asked for JSON but nothing
//! guarantees it, so decoding runs in two stages:
//!
//! 1. strict: the whole reply must be a JSON object or array;
//! 2. extraction: the span from the first `{` to the last `}` must parse.
//!
//! Each stage returns its own `Result`. Only when both fail does planning fail.

use crate::error::AppError;
use crate::orchestrator::generator::{ResponseFormat, TextGenerator};
use crate::orchestrator::plan_types::{Metadata, RawPlan};
use crate::orchestrator::registry::describe_tools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

static EMBEDDED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{.*\}").expect("EMBEDDED_OBJECT is a compile-time constant")
});

/// Why a planner reply could not be decoded
#[derive(Error, Debug)]
pub enum PlanDecodeError {
    /// The reply as a whole is not JSON
    #[error("response is not valid JSON: {0}")]
    Strict(#[source] serde_json::Error),

    /// The reply is JSON but neither an object nor an array
    #[error("response is JSON but not a plan object")]
    NotAPlan,

    /// No brace-delimited span exists in the reply
    #[error("no JSON object found in response")]
    NoObject,

    /// The brace-delimited span does not parse
    #[error("embedded JSON object is invalid: {0}")]
    Embedded(#[source] serde_json::Error),
}

/// Stage one: the whole reply must decode to an object or array
pub fn decode_strict(text: &str) -> Result<Value, PlanDecodeError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(PlanDecodeError::Strict)?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        _ => Err(PlanDecodeError::NotAPlan),
    }
}

/// Stage two: decode the first-`{`-to-last-`}` span of the reply
pub fn extract_embedded(text: &str) -> Result<Value, PlanDecodeError> {
    let span = EMBEDDED_OBJECT
        .find(text)
        .ok_or(PlanDecodeError::NoObject)?;
    serde_json::from_str(span.as_str()).map_err(PlanDecodeError::Embedded)
}

/// Run both decode stages; the error is the extraction stage's
pub fn decode_planner_output(text: &str) -> Result<Value, PlanDecodeError> {
    decode_strict(text).or_else(|strict_error| {
        tracing::debug!(
            error = %strict_error,
            "Strict plan decode failed, trying embedded object"
        );
        extract_embedded(text)
    })
}

/// Ask the model for a plan
///
/// # Arguments
/// * `generator` - Model client
/// * `message` - Customer message, passed through unvalidated
/// * `metadata` - Advisory customer details included in the prompt
///
/// # Returns
/// * `Ok(RawPlan)` - Untyped steps for the validator
/// * `Err(AppError::PlanningFailed)` - If the model call fails or its reply
///   cannot be decoded by either stage. Not retried.
pub async fn run_planner(
    generator: &dyn TextGenerator,
    message: &str,
    metadata: &Metadata,
) -> Result<RawPlan, AppError> {
    let prompt = build_planner_prompt(message, metadata);

    let reply = generator
        .generate(&prompt, ResponseFormat::Json)
        .await
        .map_err(|e| AppError::PlanningFailed(format!("planner call failed: {}", e)))?;

    tracing::debug!(response_len = reply.len(), "Received planner response");

    let document = decode_planner_output(&reply).map_err(|e| {
        tracing::warn!(
            error = %e,
            response_len = reply.len(),
            "Planner produced unparseable output"
        );
        AppError::PlanningFailed(format!("planner produced unparseable output: {}", e))
    })?;

    Ok(RawPlan::from_document(document))
}

/// Build the planner prompt
fn build_planner_prompt(message: &str, metadata: &Metadata) -> String {
    let tools = serde_json::to_string_pretty(&describe_tools()).unwrap_or_default();

    let mut customer = String::new();
    if let Some(name) = metadata.customer_name.as_deref() {
        customer.push_str(&format!("Customer name: {}\n", name));
    }
    if let Some(email) = metadata.customer_email.as_deref() {
        customer.push_str(&format!("Customer email: {}\n", email));
    }
    if customer.is_empty() {
        customer.push_str("Customer details: not provided\n");
    }

    format!(
        r#"You are an autonomous Customer Support planner. Given the user's message, produce a JSON plan with an array 'plan'.
Each step is an object with fields:
- action: one of ['search_kb','create_ticket','http_get','respond']
- args: object with arguments for the action
- reason: short explanation

Use 'respond' with args {{"text": "..."}} only when you can answer the customer directly.
Use 'create_ticket' when the customer needs follow-up from a human; fill customer_name and customer_email from the customer details when known.

Output Format (JSON):
{{
  "plan": [
    {{"action": "search_kb", "args": {{"query": "return policy", "top_k": 3}}, "reason": "Look up the policy"}}
  ]
}}

Return only valid JSON.

{customer}
User message: {message}

Available tools and descriptions: {tools}
"#,
        customer = customer,
        message = message,
        tools = tools,
    )
}
