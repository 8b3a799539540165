//! Plan executor
//!
//! Runs validated steps one at a time, in plan order, against the
//! [`Toolbox`]. Every step produces exactly one [`TraceEntry`]; a failing step
//! records an `error` field and execution moves on.
//!
//! Side-effecting steps (`create_ticket`, `http_get`) run at most once per
//! plan for a given set of arguments. A repeat is recorded as skipped with a
//! pointer to the step that already ran.

use crate::orchestrator::config::PlanLimits;
use crate::orchestrator::constants::{NO_SUBJECT, UNKNOWN_CUSTOMER};
use crate::orchestrator::plan_types::{Action, PlanStep, StepArgs, TraceEntry};
use crate::tools::{NewTicket, Toolbox};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Instant;

/// What running a plan produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
    /// One entry per executed step, in plan order
    pub trace: Vec<TraceEntry>,
    /// Text of the last `respond` step that carried any
    pub final_text: Option<String>,
}

/// Execute `steps` sequentially
pub async fn execute_plan(steps: &[PlanStep], tools: &Toolbox, limits: &PlanLimits) -> Execution {
    let mut execution = Execution::default();
    // (action, canonical args) -> index of the step that ran
    let mut side_effects: HashMap<(String, String), usize> = HashMap::new();

    for (index, step) in steps.iter().enumerate() {
        let started = Instant::now();

        if step.action.has_side_effects() {
            let key = (step.action.to_string(), canonical_args(&step.args));
            if let Some(&first) = side_effects.get(&key) {
                tracing::warn!(
                    step = index,
                    action = %step.action,
                    duplicate_of = first,
                    "Skipping duplicate side-effecting step"
                );
                execution.trace.push(TraceEntry::for_step(
                    step,
                    json!({
                        "error": format!("duplicate {} step skipped", step.action),
                        "duplicate_of": first,
                    }),
                ));
                continue;
            }
            side_effects.insert(key, index);
        }

        let result = match &step.action {
            Action::SearchKb => search_kb(&step.args, tools, limits).await,
            Action::CreateTicket => create_ticket(&step.args, tools).await,
            Action::HttpGet => http_get(&step.args, tools).await,
            Action::Respond => {
                let text = step.args.get("text").and_then(Value::as_str);
                match text {
                    Some(text) if !text.trim().is_empty() => {
                        execution.final_text = Some(text.to_string());
                    }
                    _ => tracing::warn!(step = index, "respond step has no text"),
                }
                json!({ "delivered_text": text })
            }
            Action::Unknown(_) => {
                tracing::warn!(step = index, action = %step.action, "Unknown action in plan");
                json!({ "error": format!("unknown action {}", step.action) })
            }
        };

        let entry = TraceEntry::for_step(step, result);
        tracing::debug!(
            step = index,
            action = %entry.action,
            failed = entry.is_error(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Executed plan step"
        );
        execution.trace.push(entry);
    }

    execution
}

async fn search_kb(args: &StepArgs, tools: &Toolbox, limits: &PlanLimits) -> Value {
    let query = string_arg(args, "query", "");
    let top_k = top_k_arg(args, limits);
    let articles = tools.kb.search(&query, top_k).await;
    to_result(&articles)
}

async fn create_ticket(args: &StepArgs, tools: &Toolbox) -> Value {
    let ticket = NewTicket {
        customer_name: string_arg(args, "customer_name", UNKNOWN_CUSTOMER),
        customer_email: string_arg(args, "customer_email", UNKNOWN_CUSTOMER),
        subject: string_arg(args, "subject", NO_SUBJECT),
        body: string_arg(args, "body", ""),
    };
    let ticket_id = tools.tickets.create_ticket(&ticket).await;
    json!({ "ticket_id": ticket_id })
}

async fn http_get(args: &StepArgs, tools: &Toolbox) -> Value {
    let url = string_arg(args, "url", "");
    let response = tools.http.get(&url).await;
    to_result(&response)
}

/// String argument, or `default` when absent or not a string
fn string_arg(args: &StepArgs, key: &str, default: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// `top_k` from a number or numeric string, capped; default otherwise
fn top_k_arg(args: &StepArgs, limits: &PlanLimits) -> usize {
    let requested = match args.get("top_k") {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    requested
        .unwrap_or(limits.default_top_k)
        .min(limits.max_top_k)
}

/// Args serialized with object keys sorted at every depth
fn canonical_args(args: &StepArgs) -> String {
    fn sorted(value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                Value::Object(
                    entries
                        .into_iter()
                        .map(|(key, value)| (key.clone(), sorted(value)))
                        .collect(),
                )
            }
            Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
            other => other.clone(),
        }
    }
    sorted(&Value::Object(args.clone())).to_string()
}

fn to_result<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| json!({ "error": format!("failed to encode tool result: {}", e) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_args_ignore_key_order() {
        let mut first = StepArgs::new();
        first.insert("subject".into(), json!("Refund"));
        first.insert("customer_email".into(), json!("a@b.co"));
        first.insert("meta".into(), json!({"z": 1, "a": [{"y": 2, "b": 3}]}));

        let mut second = StepArgs::new();
        second.insert("meta".into(), json!({"a": [{"b": 3, "y": 2}], "z": 1}));
        second.insert("customer_email".into(), json!("a@b.co"));
        second.insert("subject".into(), json!("Refund"));

        assert_eq!(canonical_args(&first), canonical_args(&second));
        assert!(canonical_args(&first).starts_with(r#"{"customer_email""#));
    }
    use crate::tools::{HttpFetcher, HttpGetResult, KbArticle, KnowledgeBase, TicketStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeKb {
        requests: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl KnowledgeBase for FakeKb {
        async fn search(&self, query: &str, top_k: usize) -> Vec<KbArticle> {
            self.requests
                .lock()
                .unwrap()
                .push((query.to_string(), top_k));
            (0..top_k.min(2))
                .map(|i| KbArticle {
                    title: format!("{} {}", query, i),
                    content: "content".to_string(),
                })
                .collect()
        }
    }

    #[derive(Default)]
    struct FakeTickets {
        next_id: AtomicI64,
        created: Mutex<Vec<NewTicket>>,
    }

    #[async_trait]
    impl TicketStore for FakeTickets {
        async fn create_ticket(&self, ticket: &NewTicket) -> Option<i64> {
            self.created.lock().unwrap().push(ticket.clone());
            if ticket.customer_name.trim().is_empty() {
                return None;
            }
            Some(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    #[derive(Default)]
    struct FakeHttp {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpFetcher for FakeHttp {
        async fn get(&self, url: &str) -> HttpGetResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if url.starts_with("http") {
                HttpGetResult {
                    success: true,
                    status_code: 200,
                    text: "ok".to_string(),
                    headers: Default::default(),
                    error: None,
                }
            } else {
                HttpGetResult::failure("Invalid URL format")
            }
        }
    }

    struct Fixture {
        kb: Arc<FakeKb>,
        tickets: Arc<FakeTickets>,
        http: Arc<FakeHttp>,
        tools: Toolbox,
    }

    fn fixture() -> Fixture {
        let kb = Arc::new(FakeKb::default());
        let tickets = Arc::new(FakeTickets::default());
        let http = Arc::new(FakeHttp::default());
        let tools = Toolbox::new(kb.clone(), tickets.clone(), http.clone());
        Fixture {
            kb,
            tickets,
            http,
            tools,
        }
    }

    fn step(action: &str, args: Value) -> PlanStep {
        let args = match args {
            Value::Object(map) => map,
            _ => StepArgs::new(),
        };
        PlanStep::new(Action::parse(Some(action)), args, "test")
    }

    #[tokio::test]
    async fn test_empty_plan() {
        let f = fixture();
        let execution = execute_plan(&[], &f.tools, &PlanLimits::default()).await;
        assert!(execution.trace.is_empty());
        assert!(execution.final_text.is_none());
    }

    #[tokio::test]
    async fn test_search_defaults_and_caps_top_k() {
        let f = fixture();
        let steps = vec![
            step("search_kb", json!({"query": "returns"})),
            step("search_kb", json!({"query": "returns", "top_k": 500})),
            step("search_kb", json!({"query": "returns", "top_k": "3"})),
            step("search_kb", json!({"query": "returns", "top_k": -1})),
        ];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;

        assert_eq!(execution.trace.len(), 4);
        let top_ks: Vec<usize> = f.kb.requests.lock().unwrap().iter().map(|r| r.1).collect();
        assert_eq!(top_ks, vec![5, 20, 3, 5]);
    }

    #[tokio::test]
    async fn test_search_result_is_article_list() {
        let f = fixture();
        let steps = vec![step("search_kb", json!({"query": "returns", "top_k": 1}))];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;
        assert_eq!(
            execution.trace[0].result,
            json!([{"title": "returns 0", "content": "content"}])
        );
    }

    #[tokio::test]
    async fn test_ticket_defaults() {
        let f = fixture();
        let steps = vec![step("create_ticket", json!({"body": "help"}))];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;

        assert_eq!(execution.trace[0].result, json!({"ticket_id": 1}));
        let created = f.tickets.created.lock().unwrap();
        assert_eq!(created[0].customer_name, "unknown");
        assert_eq!(created[0].customer_email, "unknown");
        assert_eq!(created[0].subject, "no-subject");
        assert_eq!(created[0].body, "help");
    }

    #[tokio::test]
    async fn test_ticket_with_empty_name_is_null_not_error() {
        let f = fixture();
        let steps = vec![step(
            "create_ticket",
            json!({"customer_name": "", "customer_email": "a@b.c", "subject": "x"}),
        )];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;
        assert_eq!(execution.trace[0].result, json!({"ticket_id": null}));
        assert!(!execution.trace[0].is_error());
    }

    #[tokio::test]
    async fn test_respond_sets_final_text() {
        let f = fixture();
        let steps = vec![
            step("search_kb", json!({"query": "hours"})),
            step("respond", json!({"text": "We are open 9-5."})),
        ];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;
        assert_eq!(execution.final_text.as_deref(), Some("We are open 9-5."));
        assert_eq!(
            execution.trace[1].result,
            json!({"delivered_text": "We are open 9-5."})
        );
    }

    #[tokio::test]
    async fn test_last_non_blank_respond_wins() {
        let f = fixture();
        let steps = vec![
            step("respond", json!({"text": "first"})),
            step("respond", json!({"text": "second"})),
            step("respond", json!({"text": "   "})),
            step("respond", json!({})),
        ];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;
        assert_eq!(execution.final_text.as_deref(), Some("second"));
        assert_eq!(execution.trace[3].result, json!({"delivered_text": null}));
    }

    #[tokio::test]
    async fn test_unknown_action_continues() {
        let f = fixture();
        let steps = vec![
            step("frobnicate", json!({})),
            step("search_kb", json!({"query": "returns"})),
        ];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;

        assert_eq!(execution.trace.len(), 2);
        assert_eq!(
            execution.trace[0].result,
            json!({"error": "unknown action frobnicate"})
        );
        assert!(!execution.trace[1].is_error());
    }

    #[tokio::test]
    async fn test_missing_action_is_reported_as_unknown() {
        let f = fixture();
        let steps = vec![PlanStep::new(Action::Unknown(None), StepArgs::new(), "")];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;
        assert_eq!(execution.trace[0].action, "unknown");
        assert_eq!(
            execution.trace[0].result,
            json!({"error": "unknown action unknown"})
        );
    }

    #[tokio::test]
    async fn test_duplicate_side_effects_run_once() {
        let f = fixture();
        let ticket = json!({"customer_name": "Ann", "customer_email": "a@b.c", "subject": "late"});
        let steps = vec![
            step("create_ticket", ticket.clone()),
            step("http_get", json!({"url": "https://status.example.com"})),
            step("create_ticket", ticket),
            step("http_get", json!({"url": "https://status.example.com"})),
            step("http_get", json!({"url": "https://other.example.com"})),
        ];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;

        assert_eq!(execution.trace.len(), 5);
        assert_eq!(f.tickets.created.lock().unwrap().len(), 1);
        assert_eq!(f.http.calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            execution.trace[2].result,
            json!({"error": "duplicate create_ticket step skipped", "duplicate_of": 0})
        );
        assert_eq!(execution.trace[3].result["duplicate_of"], 1);
    }

    #[tokio::test]
    async fn test_duplicate_reads_are_not_skipped() {
        let f = fixture();
        let steps = vec![
            step("search_kb", json!({"query": "returns"})),
            step("search_kb", json!({"query": "returns"})),
        ];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;
        assert_eq!(f.kb.requests.lock().unwrap().len(), 2);
        assert_eq!(execution.trace[0].result, execution.trace[1].result);
    }

    #[tokio::test]
    async fn test_http_get_failure_is_captured() {
        let f = fixture();
        let steps = vec![step("http_get", json!({"url": "ftp://example.com"}))];
        let execution = execute_plan(&steps, &f.tools, &PlanLimits::default()).await;

        let result = &execution.trace[0].result;
        assert_eq!(result["success"], false);
        assert_eq!(result["error"], "Invalid URL format");
    }
}
