//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::orchestrator::config::{env_or, OrchestratorConfig};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
    /// Tool configuration
    pub tools: ToolConfig,
    /// Planner / executor / synthesizer configuration
    pub orchestrator: OrchestratorConfig,
    /// Gemini API key (required by the binaries, absent in tests)
    pub gemini_api_key: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Path of the SQLite database file
    pub database_path: String,
}

/// Tool configuration
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Timeout for `http_get` requests (in seconds)
    pub http_timeout_secs: u64,
    /// Maximum number of characters of a fetched body kept in the trace
    pub http_max_body_chars: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env_or("AGENT_PORT", 8000),
                host: env::var("AGENT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            persistence: PersistenceConfig {
                database_path: env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "data/agent_data.db".to_string()),
            },
            tools: ToolConfig {
                http_timeout_secs: env_or("HTTP_TOOL_TIMEOUT_SECS", 10),
                http_max_body_chars: 4000,
            },
            orchestrator: OrchestratorConfig::from_env(),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The Gemini API key, or an error naming the variable to set
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Set GEMINI_API_KEY environment variable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        for key in ["AGENT_PORT", "AGENT_HOST", "DATABASE_PATH", "HTTP_TOOL_TIMEOUT_SECS"] {
            std::env::remove_var(key);
        }
        let config = Config::from_env();
        assert_eq!(config.server_addr(), "0.0.0.0:8000");
        assert_eq!(config.persistence.database_path, "data/agent_data.db");
        assert_eq!(config.tools.http_timeout_secs, 10);
        assert_eq!(config.tools.http_max_body_chars, 4000);
    }

    #[test]
    #[serial]
    fn test_empty_api_key_is_missing() {
        let original = std::env::var("GEMINI_API_KEY").ok();
        std::env::set_var("GEMINI_API_KEY", "");

        let config = Config::from_env();
        assert!(config.gemini_api_key.is_none());
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        if let Some(key) = original {
            std::env::set_var("GEMINI_API_KEY", &key);
        } else {
            std::env::remove_var("GEMINI_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_port_override() {
        std::env::set_var("AGENT_PORT", "9100");
        let config = Config::from_env();
        std::env::remove_var("AGENT_PORT");
        assert_eq!(config.server.port, 9100);
    }
}
