//! Plan validator
//!
//! Turns untrusted planner steps into typed [`PlanStep`]s. Validation is
//! permissive: a malformed step degrades to `unknown` (or to empty args) and
//! fails on its own at execution time instead of rejecting the whole plan.
//! The one hard rule is the step limit.

use crate::orchestrator::plan_types::{Action, PlanStep, StepArgs, ValidatedPlan};
use serde_json::Value;

/// Validate a raw step list
///
/// # Arguments
/// * `raw_steps` - Steps as decoded from the planner
/// * `max_steps` - Steps past this index are dropped
pub fn validate_plan(raw_steps: Vec<Value>, max_steps: usize) -> ValidatedPlan {
    let total = raw_steps.len();
    let dropped_steps = total.saturating_sub(max_steps);
    if dropped_steps > 0 {
        tracing::warn!(
            total_steps = total,
            max_steps = max_steps,
            dropped_steps = dropped_steps,
            "Plan exceeds step limit, dropping trailing steps"
        );
    }

    let steps: Vec<PlanStep> = raw_steps
        .into_iter()
        .take(max_steps)
        .map(validate_step)
        .collect();

    let unknown = steps
        .iter()
        .filter(|step| matches!(step.action, Action::Unknown(_)))
        .count();
    if unknown > 0 {
        tracing::debug!(unknown_steps = unknown, "Plan contains unrecognized actions");
    }

    ValidatedPlan {
        steps,
        dropped_steps,
    }
}

/// Validate a single raw step
fn validate_step(raw: Value) -> PlanStep {
    let Value::Object(mut fields) = raw else {
        return PlanStep::new(Action::Unknown(None), StepArgs::new(), "");
    };

    let action = Action::parse(fields.get("action").and_then(Value::as_str));

    let args = match fields.remove("args") {
        Some(Value::Object(args)) => args,
        _ => StepArgs::new(),
    };

    let reason = match fields.remove("reason") {
        Some(Value::String(reason)) => reason,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    PlanStep::new(action, args, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_actions_are_typed() {
        let plan = validate_plan(
            vec![
                json!({"action": "search_kb", "args": {"query": "shipping"}, "reason": "lookup"}),
                json!({"action": "respond", "args": {"text": "Hi"}}),
            ],
            10,
        );
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].action, Action::SearchKb);
        assert_eq!(plan.steps[0].args["query"], "shipping");
        assert_eq!(plan.steps[0].reason, "lookup");
        assert_eq!(plan.steps[1].action, Action::Respond);
        assert_eq!(plan.dropped_steps, 0);
    }

    #[test]
    fn test_missing_action_is_unknown() {
        let plan = validate_plan(vec![json!({"args": {"query": "x"}})], 10);
        assert_eq!(plan.steps[0].action, Action::Unknown(None));
        assert_eq!(plan.steps[0].args["query"], "x");
    }

    #[test]
    fn test_unrecognized_action_is_unknown() {
        let plan = validate_plan(vec![json!({"action": "frobnicate"})], 10);
        assert_eq!(
            plan.steps[0].action,
            Action::Unknown(Some("frobnicate".to_string()))
        );
    }

    #[test]
    fn test_non_string_action_is_unknown() {
        let plan = validate_plan(vec![json!({"action": 3})], 10);
        assert_eq!(plan.steps[0].action, Action::Unknown(None));
    }

    #[test]
    fn test_missing_or_malformed_args_default_to_empty() {
        let plan = validate_plan(
            vec![
                json!({"action": "search_kb"}),
                json!({"action": "search_kb", "args": "return policy"}),
                json!({"action": "search_kb", "args": null}),
            ],
            10,
        );
        assert!(plan.steps.iter().all(|step| step.args.is_empty()));
    }

    #[test]
    fn test_reason_is_preserved() {
        let plan = validate_plan(
            vec![
                json!({"action": "respond"}),
                json!({"action": "respond", "reason": 12}),
            ],
            10,
        );
        assert_eq!(plan.steps[0].reason, "");
        assert_eq!(plan.steps[1].reason, "12");
    }

    #[test]
    fn test_non_object_step_is_unknown() {
        let plan = validate_plan(vec![json!("search_kb"), json!(null)], 10);
        assert_eq!(plan.steps.len(), 2);
        assert!(plan
            .steps
            .iter()
            .all(|step| step.action == Action::Unknown(None)));
    }

    #[test]
    fn test_step_limit_truncates() {
        let raw: Vec<Value> = (0..5)
            .map(|i| json!({"action": "search_kb", "args": {"query": format!("q{}", i)}}))
            .collect();
        let plan = validate_plan(raw, 3);
        assert_eq!(plan.steps.len(), 3);
        assert_eq!(plan.dropped_steps, 2);
        assert_eq!(plan.steps[2].args["query"], "q2");
    }

    #[test]
    fn test_empty_plan() {
        let plan = validate_plan(Vec::new(), 10);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.dropped_steps, 0);
    }
}
