//! Reply synthesizer
//!
//! Used only when no `respond` step produced a reply: the whole trace goes to
//! the model, which writes the customer-facing answer.

use crate::error::AppError;
use crate::orchestrator::generator::{ResponseFormat, TextGenerator};
use crate::orchestrator::plan_types::TraceEntry;
use serde_json::json;

/// Generate a reply from `trace` and append a `synthesize_reply` entry
///
/// # Errors
/// * `AppError::SynthesisFailed` if the model call fails or returns blank text.
///   The trace is left untouched in that case.
pub async fn synthesize(
    generator: &dyn TextGenerator,
    trace: &mut Vec<TraceEntry>,
) -> Result<String, AppError> {
    let prompt = build_synthesis_prompt(trace)?;

    let reply = generator
        .generate(&prompt, ResponseFormat::Text)
        .await
        .map_err(|e| AppError::SynthesisFailed(format!("synthesis call failed: {}", e)))?;

    let text = reply.trim();
    if text.is_empty() {
        return Err(AppError::SynthesisFailed(
            "model returned an empty reply".to_string(),
        ));
    }

    tracing::debug!(reply_len = text.len(), "Synthesized reply");
    trace.push(TraceEntry::synthesized(text));
    Ok(text.to_string())
}

fn build_synthesis_prompt(trace: &[TraceEntry]) -> Result<String, AppError> {
    let summary = serde_json::to_string(&json!({ "trace": trace }))
        .map_err(|e| AppError::SynthesisFailed(format!("failed to encode trace: {}", e)))?;

    Ok(format!(
        "Given the following execution trace of tools and findings, write a friendly customer-facing reply summarizing what we found, next steps, and a polite closing.\n\nExecution trace (JSON): {}\n",
        summary
    ))
}
