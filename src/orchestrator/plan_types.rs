//! Plan and trace types
//!
//! A plan arrives from the planner as untyped JSON. The validator turns each
//! raw step into a [`PlanStep`] whose [`Action`] is a closed enum; the executor
//! matches on it exhaustively and records one [`TraceEntry`] per step.

use crate::orchestrator::constants::{MISSING_ACTION, SYNTHESIZE_ACTION};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Argument mapping of a plan step, exactly as the planner produced it
pub type StepArgs = Map<String, Value>;

/// Action requested by a plan step
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Full-text search of the knowledge base
    SearchKb,
    /// Open a support ticket
    CreateTicket,
    /// Fetch an external URL
    HttpGet,
    /// Deliver `args.text` as the final reply
    Respond,
    /// Anything outside the known set; holds the raw name when one was given
    Unknown(Option<String>),
}

impl Action {
    /// Classify a raw action name from planner output
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("search_kb") => Action::SearchKb,
            Some("create_ticket") => Action::CreateTicket,
            Some("http_get") => Action::HttpGet,
            Some("respond") => Action::Respond,
            other => Action::Unknown(other.map(str::to_string)),
        }
    }

    /// Name used in prompts and traces
    pub fn as_str(&self) -> &str {
        match self {
            Action::SearchKb => "search_kb",
            Action::CreateTicket => "create_ticket",
            Action::HttpGet => "http_get",
            Action::Respond => "respond",
            Action::Unknown(Some(name)) => name,
            Action::Unknown(None) => MISSING_ACTION,
        }
    }

    /// Whether running the step writes state or reaches outside the process
    pub fn has_side_effects(&self) -> bool {
        matches!(self, Action::CreateTicket | Action::HttpGet)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One validated action the orchestrator will take
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanStep {
    /// What to do
    pub action: Action,
    /// Arguments, untouched; each tool applies its own defaults
    pub args: StepArgs,
    /// Planner's justification, carried for observability only
    pub reason: String,
}

impl PlanStep {
    /// Build a step from its parts
    pub fn new(action: Action, args: StepArgs, reason: impl Into<String>) -> Self {
        Self {
            action,
            args,
            reason: reason.into(),
        }
    }
}

/// Plan steps as decoded from the planner, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlan {
    /// Untyped step descriptors in planner order
    pub steps: Vec<Value>,
}

impl RawPlan {
    /// Pull the step list out of a decoded planner document
    ///
    /// `{"plan": [...]}` yields the array, a bare array is taken as the plan,
    /// anything else is an empty plan.
    pub fn from_document(document: Value) -> Self {
        let steps = match document {
            Value::Object(mut fields) => match fields.remove("plan") {
                Some(Value::Array(steps)) => steps,
                _ => Vec::new(),
            },
            Value::Array(steps) => steps,
            _ => Vec::new(),
        };
        Self { steps }
    }
}

/// Output of the validator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedPlan {
    /// Steps to execute, in order
    pub steps: Vec<PlanStep>,
    /// Steps discarded because the plan exceeded the step limit
    pub dropped_steps: usize,
}

/// Record of one executed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Action name
    pub action: String,
    /// Planner's reason, echoed
    #[serde(default)]
    pub reason: String,
    /// Step arguments, echoed
    #[serde(default)]
    pub args: StepArgs,
    /// Outcome payload or error marker
    pub result: Value,
}

impl TraceEntry {
    /// Trace entry for an executed plan step
    pub fn for_step(step: &PlanStep, result: Value) -> Self {
        Self {
            action: step.action.to_string(),
            reason: step.reason.clone(),
            args: step.args.clone(),
            result,
        }
    }

    /// Trace entry for the synthesized reply
    pub fn synthesized(text: &str) -> Self {
        Self {
            action: SYNTHESIZE_ACTION.to_string(),
            reason: String::new(),
            args: StepArgs::new(),
            result: Value::String(text.to_string()),
        }
    }

    /// Whether the result carries an `error` field
    pub fn is_error(&self) -> bool {
        self.result
            .get("error")
            .map(|error| !error.is_null())
            .unwrap_or(false)
    }
}

/// Final product of one `handle` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Customer-facing reply; never empty
    pub final_text: String,
    /// Ordered audit log of the request
    pub trace: Vec<TraceEntry>,
}

/// Advisory caller metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Customer's name
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Customer's email address
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Opaque session identifier; logged, never used for continuity
    #[serde(default)]
    pub session_id: Option<String>,
}
