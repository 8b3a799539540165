//! Send one message to the agent and print the result
//!
//! Usage: `ask "What is your return policy?" [customer_name] [customer_email]`
//!
//! Uses the same environment configuration as the server.

use support_agent::config::Config;
use support_agent::orchestrator::Metadata;
use support_agent::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let message = args.next().ok_or_else(|| {
        anyhow::anyhow!("Usage: ask <message> [customer_name] [customer_email]")
    })?;
    let metadata = Metadata {
        customer_name: args.next(),
        customer_email: args.next(),
        session_id: None,
    };

    let config = Config::from_env();
    config.orchestrator.validate()?;
    let state = AppState::from_config(config).await?;

    let result = state.agent.handle(&message, &metadata).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
