//! HTTP GET tool
//!
//! Fetches an external page for a plan step. Only `http://` and `https://`
//! URLs are attempted; everything else fails locally without touching the
//! network. Timeouts, connection failures and other request errors are
//! reported with distinct messages.

use crate::error::AppError;
use crate::tools::{HttpFetcher, HttpGetResult};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = "CustomerServiceAgent/1.0";

/// Error text for URLs that are not http(s)
pub const INVALID_URL: &str = "Invalid URL format";

/// reqwest-backed [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct HttpTool {
    client: reqwest::Client,
    max_body_chars: usize,
}

impl HttpTool {
    /// Build the tool with a per-request timeout and body truncation length
    ///
    /// # Errors
    /// * Returns `AppError::Internal` if the HTTP client cannot be constructed
    pub fn new(timeout: Duration, max_body_chars: usize) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_body_chars,
        })
    }

    async fn fetch(&self, url: &str) -> HttpGetResult {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return classify_error(url, e),
        };

        let status_code = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return classify_error(url, e),
        };

        tracing::debug!(
            url = %url,
            status_code = status_code,
            body_len = body.len(),
            "http_get completed"
        );

        HttpGetResult {
            success: true,
            status_code,
            text: truncate_chars(&body, self.max_body_chars),
            headers,
            error: None,
        }
    }
}

#[async_trait]
impl HttpFetcher for HttpTool {
    async fn get(&self, url: &str) -> HttpGetResult {
        if !is_http_url(url) {
            tracing::warn!(url = %url, "http_get rejected URL");
            return HttpGetResult::failure(INVALID_URL);
        }
        self.fetch(url).await
    }
}

/// Whether the URL has an `http://` or `https://` prefix
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn classify_error(url: &str, error: reqwest::Error) -> HttpGetResult {
    let message = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        "Connection error".to_string()
    } else {
        format!("Request error: {}", error)
    };
    tracing::warn!(url = %url, error = %error, "http_get failed");
    HttpGetResult::failure(message)
}

/// Keep at most `max_chars` characters
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
