//! Text generation seam
//!
//! The planner and synthesizer talk to the model through [`TextGenerator`],
//! so the orchestrator can be driven by the Gemini client in production and by
//! scripted replies in tests.

use crate::error::AppError;
use async_trait::async_trait;

/// Output format requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Free-form prose
    Text,
    /// Ask the model to emit JSON (still not guaranteed)
    Json,
}

/// A single blocking prompt -> text completion
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's text
    async fn generate(&self, prompt: &str, format: ResponseFormat) -> Result<String, AppError>;
}
