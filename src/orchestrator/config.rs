//! Orchestrator configuration
//!
//! Centralized configuration for the planner, executor and synthesizer.

use crate::error::AppError;
use crate::orchestrator::constants::{DEFAULT_TOP_K, MAX_TOP_K};
use serde::Serialize;
use std::env;
use std::str::FromStr;

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize)]
pub struct OrchestratorConfig {
    /// Gemini API timeout in seconds
    pub gemini_timeout_secs: u64,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_api_base_url: String,
    /// Maximum customer message length in characters (enforced by the HTTP layer)
    pub max_message_length: usize,
    /// Maximum number of plan steps executed per request
    pub max_plan_steps: usize,
    /// `top_k` used when a search step does not supply one
    pub default_top_k: usize,
    /// Upper bound applied to any requested `top_k`
    pub max_top_k: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            gemini_timeout_secs: 30,
            gemini_model: "gemini-2.0-flash-exp".to_string(),
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            max_message_length: 2000,
            max_plan_steps: 10,
            default_top_k: DEFAULT_TOP_K,
            max_top_k: MAX_TOP_K,
        }
    }
}

/// Limits applied while validating and executing a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    /// Steps beyond this count are dropped by the validator
    pub max_plan_steps: usize,
    /// Default `top_k` for `search_kb`
    pub default_top_k: usize,
    /// Cap for `top_k` in `search_kb`
    pub max_top_k: usize,
}

impl Default for PlanLimits {
    fn default() -> Self {
        OrchestratorConfig::default().plan_limits()
    }
}

impl OrchestratorConfig {
    /// Load orchestrator settings from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_timeout_secs: env_or("GEMINI_TIMEOUT_SECS", defaults.gemini_timeout_secs),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base_url: env::var("GEMINI_API_BASE_URL")
                .unwrap_or(defaults.gemini_api_base_url),
            max_message_length: env_or("MAX_MESSAGE_LENGTH", defaults.max_message_length),
            max_plan_steps: env_or("MAX_PLAN_STEPS", defaults.max_plan_steps),
            default_top_k: defaults.default_top_k,
            max_top_k: defaults.max_top_k,
        }
    }

    /// Limits handed to the validator and executor
    pub fn plan_limits(&self) -> PlanLimits {
        PlanLimits {
            max_plan_steps: self.max_plan_steps,
            default_top_k: self.default_top_k,
            max_top_k: self.max_top_k,
        }
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Ok(())` - All values are usable
    /// * `Err(AppError)` - If a limit is zero or the model name is empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.gemini_model.trim().is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "gemini_model cannot be empty"
            )));
        }
        if self.gemini_timeout_secs == 0 {
            return Err(AppError::Internal(anyhow::anyhow!(
                "gemini_timeout_secs must be > 0"
            )));
        }
        if self.max_message_length == 0 {
            return Err(AppError::Internal(anyhow::anyhow!(
                "max_message_length must be > 0"
            )));
        }
        if self.max_plan_steps == 0 {
            return Err(AppError::Internal(anyhow::anyhow!(
                "max_plan_steps must be > 0"
            )));
        }
        if self.default_top_k > self.max_top_k {
            return Err(AppError::Internal(anyhow::anyhow!(
                "default_top_k ({}) must not exceed max_top_k ({})",
                self.default_top_k,
                self.max_top_k
            )));
        }
        Ok(())
    }
}

/// Read and parse an environment variable, falling back to `default`
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
