//! Customer Support Agent server
//!
//! Serves the agent and direct knowledge-base and ticket access over HTTP.

use std::net::SocketAddr;
use support_agent::api;
use support_agent::config::Config;
use support_agent::state::AppState;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    config.orchestrator.validate()?;
    info!(
        addr = %config.server_addr(),
        database = %config.persistence.database_path,
        model = %config.orchestrator.gemini_model,
        max_plan_steps = config.orchestrator.max_plan_steps,
        "Configuration loaded"
    );

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    let state = AppState::from_config(config).await?.shared();

    // request_id is outermost so TraceLayer spans nest under it
    let app = api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(api::middleware::request_id))
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(version = env!("CARGO_PKG_VERSION"), "Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    info!(signal, "Shutting down");
}
