//! Gemini API client
//!
//! Direct HTTP client for calling the Gemini `generateContent` endpoint.
//! Used by both model calls of a request: the planner (JSON mode) and the
//! reply synthesizer (plain text).

use crate::error::AppError;
use crate::orchestrator::config::OrchestratorConfig;
use crate::orchestrator::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use crate::orchestrator::generator::{ResponseFormat, TextGenerator};
use anyhow::anyhow;
use async_trait::async_trait;
use std::time::Duration;

/// Gemini client configured once at startup and shared read-only
///
/// Holds a pooled `reqwest::Client`, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a client from the orchestrator configuration
    ///
    /// # Errors
    /// * Returns `AppError::Internal` if the API key is empty or the HTTP
    ///   client cannot be constructed.
    pub fn new(api_key: &str, config: &OrchestratorConfig) -> Result<Self, AppError> {
        if api_key.is_empty() {
            return Err(AppError::Internal(anyhow!("API key is empty")));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Model this client sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Call Gemini with a prompt and return the first candidate's text
    ///
    /// # Arguments
    /// * `prompt` - The prompt to send
    /// * `format` - `Json` sets `response_mime_type` to `application/json`
    ///
    /// # Errors
    /// * `AppError::Timeout` if the request exceeded the configured timeout
    /// * `AppError::Internal` if the HTTP request fails, the API returns an
    ///   error status, the prompt is blocked, or no text comes back
    pub async fn call(&self, prompt: &str, format: ResponseFormat) -> Result<String, AppError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request_body = GenerateContentRequest::new(prompt, format);

        tracing::debug!(
            model = %self.model,
            format = ?format,
            prompt_len = prompt.len(),
            "Calling Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(format!(
                        "Gemini API request timed out: {}",
                        e.without_url()
                    ))
                } else {
                    AppError::Internal(anyhow!(
                        "Failed to send HTTP request to Gemini API: {}",
                        e.without_url()
                    ))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Gemini API returned error status"
            );

            if status_code == 429 {
                return Err(AppError::Internal(anyhow!(
                    "Gemini API rate limit exceeded (HTTP {}): {}",
                    status_code,
                    error_body
                )));
            }

            return Err(AppError::Internal(anyhow!(
                "Gemini API returned error status {}: {}",
                status_code,
                error_body
            )));
        }

        let response_body = response.text().await.map_err(|e| {
            AppError::Internal(anyhow!(
                "Failed to read response body from Gemini API: {}",
                e.without_url()
            ))
        })?;

        let parsed: GenerateContentResponse = serde_json::from_str(&response_body).map_err(|e| {
            AppError::Internal(anyhow!(
                "Failed to parse JSON response from Gemini API: {} - Response body: {}",
                e,
                response_body
            ))
        })?;

        let text = parsed
            .reply_text()
            .map_err(|e| AppError::Internal(anyhow!(e)))?;

        tracing::debug!(
            response_len = text.len(),
            "Successfully received response from Gemini API"
        );

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, format: ResponseFormat) -> Result<String, AppError> {
        self.call(prompt, format).await
    }
}
