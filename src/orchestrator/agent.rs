//! Support agent
//!
//! One request runs Planner -> Validator -> Executor and then, only when no
//! `respond` step supplied the answer, the Synthesizer. Nothing is retried.
//! Planning and synthesis errors are fatal to the request; tool failures are
//! already captured in the trace by the executor.

use crate::error::AppError;
use crate::orchestrator::config::PlanLimits;
use crate::orchestrator::executor::execute_plan;
use crate::orchestrator::generator::TextGenerator;
use crate::orchestrator::plan_types::{ExecutionResult, Metadata};
use crate::orchestrator::planner::run_planner;
use crate::orchestrator::synthesizer::synthesize;
use crate::orchestrator::utils::{hash_message, hash_plan};
use crate::orchestrator::validator::validate_plan;
use crate::tools::Toolbox;
use std::sync::Arc;
use std::time::Instant;

/// Plan-execute-synthesize orchestrator
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct SupportAgent {
    generator: Arc<dyn TextGenerator>,
    tools: Toolbox,
    limits: PlanLimits,
}

impl SupportAgent {
    /// Assemble an agent from its model client, tools and limits
    pub fn new(generator: Arc<dyn TextGenerator>, tools: Toolbox, limits: PlanLimits) -> Self {
        Self {
            generator,
            tools,
            limits,
        }
    }

    /// Limits this agent runs with
    pub fn limits(&self) -> &PlanLimits {
        &self.limits
    }

    /// Answer one customer message
    ///
    /// # Arguments
    /// * `message` - Customer text, not validated here
    /// * `metadata` - Advisory customer details; `session_id` is only logged
    ///
    /// # Returns
    /// * `Ok(ExecutionResult)` - Non-empty reply and the full trace
    /// * `Err(AppError::PlanningFailed)` - Planner call or decode failed
    /// * `Err(AppError::SynthesisFailed)` - Synthesis was needed and failed
    pub async fn handle(
        &self,
        message: &str,
        metadata: &Metadata,
    ) -> Result<ExecutionResult, AppError> {
        let started = Instant::now();
        let message_hash = hash_message(message);
        let session_id = metadata.session_id.as_deref().unwrap_or("-");

        tracing::info!(
            message_hash = %message_hash,
            message_len = message.len(),
            session_id = %session_id,
            "Handling customer message"
        );

        let raw_plan = run_planner(self.generator.as_ref(), message, metadata).await?;
        let plan = validate_plan(raw_plan.steps, self.limits.max_plan_steps);

        tracing::debug!(
            message_hash = %message_hash,
            plan_hash = %hash_plan(&plan.steps),
            steps = plan.steps.len(),
            dropped_steps = plan.dropped_steps,
            "Plan validated"
        );

        let execution = execute_plan(&plan.steps, &self.tools, &self.limits).await;
        let mut trace = execution.trace;

        let (final_text, synthesized) = match execution.final_text {
            Some(text) => (text, false),
            None => (synthesize(self.generator.as_ref(), &mut trace).await?, true),
        };

        tracing::info!(
            message_hash = %message_hash,
            session_id = %session_id,
            trace_len = trace.len(),
            synthesized = synthesized,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Customer message handled"
        );

        Ok(ExecutionResult { final_text, trace })
    }
}
