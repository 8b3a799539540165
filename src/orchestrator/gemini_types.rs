//! Gemini `generateContent` wire types
//!
//! Only the fields the agent reads or sends. Responses are accepted in both
//! the camelCase the REST API emits and snake_case.

use crate::orchestrator::generator::ResponseFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a `generateContent` call with a single user prompt
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    /// One content turn holding the prompt
    pub contents: Vec<RequestContent>,
    /// Present only when JSON output is requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single-turn request for `prompt` in the given output format
    pub fn new(prompt: &str, format: ResponseFormat) -> Self {
        let generation_config = match format {
            ResponseFormat::Json => Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
            ResponseFormat::Text => None,
        };
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        }
    }
}

/// A content turn in a request
#[derive(Serialize, Debug)]
pub struct RequestContent {
    /// Text parts
    pub parts: Vec<RequestPart>,
}

/// Text part of a request turn
#[derive(Serialize, Debug)]
pub struct RequestPart {
    /// Prompt text
    pub text: String,
}

/// Output constraints
#[derive(Serialize, Debug)]
pub struct GenerationConfig {
    /// Forced output MIME type
    pub response_mime_type: String,
}

/// Why a successful HTTP response still carries no usable reply
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReplyError {
    /// Safety filters rejected the prompt
    #[error("Gemini API blocked the prompt: {0}")]
    Blocked(String),
    /// The response has no candidates at all
    #[error("Gemini API response contains no candidates")]
    NoCandidates,
    /// The first candidate's text is blank
    #[error("Gemini API response text is empty")]
    EmptyText,
}

/// `generateContent` response
#[derive(Deserialize, Debug)]
pub struct GenerateContentResponse {
    /// Model replies, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Set when the prompt itself was rejected
    #[serde(default, alias = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn reply_text(&self) -> Result<String, ReplyError> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_ref())
        {
            return Err(ReplyError::Blocked(reason.clone()));
        }

        let candidate = self.candidates.first().ok_or(ReplyError::NoCandidates)?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        if text.trim().is_empty() {
            return Err(ReplyError::EmptyText);
        }
        Ok(text)
    }
}

/// One model reply
#[derive(Deserialize, Debug)]
pub struct Candidate {
    /// Reply content; absent when generation stopped early
    #[serde(default)]
    pub content: CandidateContent,
    /// Why generation stopped
    #[serde(default, alias = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Parts of a reply
#[derive(Deserialize, Debug, Default)]
pub struct CandidateContent {
    /// Text fragments in order
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// Text fragment of a reply
#[derive(Deserialize, Debug)]
pub struct CandidatePart {
    /// Fragment text; non-text parts deserialize as empty
    #[serde(default)]
    pub text: String,
}

/// Prompt-level feedback
#[derive(Deserialize, Debug)]
pub struct PromptFeedback {
    /// Block reason, e.g. `SAFETY`
    #[serde(default, alias = "blockReason")]
    pub block_reason: Option<String>,
}
