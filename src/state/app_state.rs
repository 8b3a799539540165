//! Application state
//!
//! Built once at startup and shared read-only by every handler.

use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::orchestrator::api_client::GeminiClient;
use crate::orchestrator::{SupportAgent, TextGenerator};
use crate::tools::{HttpTool, SqliteKnowledgeBase, SqliteTicketStore, Toolbox};
use std::sync::Arc;
use std::time::Duration;

/// Handle to the state passed to axum handlers
pub type SharedState = Arc<AppState>;

/// Everything a request needs
///
/// Nothing in here is mutated after construction, so the state is shared
/// behind a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The orchestrator answering `/message`
    pub agent: SupportAgent,
    /// Database handle, used for health checks
    pub database: Database,
    /// Knowledge base, also exposed directly over HTTP
    pub kb: SqliteKnowledgeBase,
    /// Ticket store, also exposed directly over HTTP
    pub tickets: SqliteTicketStore,
    /// Loaded configuration
    pub config: Config,
}

impl AppState {
    /// Open the database and build the Gemini-backed agent
    ///
    /// # Errors
    /// * `AppError::Internal` if the API key is missing or a client cannot be built
    /// * Any error from [`Database::connect`]
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        let api_key = config.require_api_key()?;
        let generator = Arc::new(GeminiClient::new(api_key, &config.orchestrator)?);
        tracing::info!(model = %generator.model(), "Gemini client ready");

        let database = Database::connect(&config.persistence.database_path).await?;
        Self::with_generator(config, database, generator)
    }

    /// Build the state around an already open database and any model client
    ///
    /// # Errors
    /// * `AppError::Internal` if the HTTP tool cannot be built
    pub fn with_generator(
        config: Config,
        database: Database,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, AppError> {
        let kb = SqliteKnowledgeBase::new(database.pool().clone());
        let tickets = SqliteTicketStore::new(database.pool().clone());
        let http = HttpTool::new(
            Duration::from_secs(config.tools.http_timeout_secs),
            config.tools.http_max_body_chars,
        )?;

        let tools = Toolbox::new(
            Arc::new(kb.clone()),
            Arc::new(tickets.clone()),
            Arc::new(http),
        );
        let agent = SupportAgent::new(generator, tools, config.orchestrator.plan_limits());

        Ok(Self {
            agent,
            database,
            kb,
            tickets,
            config,
        })
    }

    /// Wrap in an `Arc` for the router
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}
