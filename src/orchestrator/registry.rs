//! Tool registry
//!
//! Static description of the actions a plan may use. It is rendered into the
//! planner prompt and nothing else reads it: no validation, no execution.
//! Adding a tool means adding an entry here and a variant to
//! [`Action`](crate::orchestrator::plan_types::Action).

use serde_json::{json, Map, Value};

/// Description of one plannable action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    /// Action name the planner must emit
    pub name: &'static str,
    /// What the action does, for the model
    pub description: &'static str,
    /// Argument name and primitive type hint pairs
    pub args: &'static [(&'static str, &'static str)],
}

/// Every action the executor knows how to run
pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "search_kb",
        description: "Search local knowledge-base. Input: a query string. Returns: list of kb items.",
        args: &[("query", "string"), ("top_k", "int")],
    },
    ToolSpec {
        name: "create_ticket",
        description: "Create a support ticket. Input: customer_name, customer_email, subject, body. Returns ticket_id.",
        args: &[
            ("customer_name", "string"),
            ("customer_email", "string"),
            ("subject", "string"),
            ("body", "string"),
        ],
    },
    ToolSpec {
        name: "http_get",
        description: "Make a HTTP GET request to an external API when needed.",
        args: &[("url", "string")],
    },
    ToolSpec {
        name: "respond",
        description: "Reply to the customer directly with the given text. Ends the need for a summary.",
        args: &[("text", "string")],
    },
];

/// Registry as JSON: `{name: {description, args: {arg: type}}}`
///
/// Keys come out sorted, so the rendered prompt is stable between calls.
pub fn describe_tools() -> Value {
    let tools: Map<String, Value> = TOOLS
        .iter()
        .map(|tool| {
            let args: Map<String, Value> = tool
                .args
                .iter()
                .map(|(name, hint)| (name.to_string(), Value::String(hint.to_string())))
                .collect();
            (
                tool.name.to_string(),
                json!({
                    "description": tool.description,
                    "args": args,
                }),
            )
        })
        .collect();
    Value::Object(tools)
}
