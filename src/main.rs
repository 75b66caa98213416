use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use pantrychef::channels::web::auth::SessionDirectory;
use pantrychef::channels::web::server::{GatewayState, shutdown, start_server};
use pantrychef::chat::ChatGateway;
use pantrychef::config::GatewayConfig;
use pantrychef::domain::InMemoryKitchen;
use pantrychef::llm::OpenAiProvider;

#[derive(Debug, Parser)]
#[command(name = "pantrychef", about = "PantryChef chat gateway")]
struct Cli {
    /// Address to bind, overriding PANTRYCHEF_BIND.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Daily message limit per user, overriding PANTRYCHEF_DAILY_LIMIT.
    #[arg(long)]
    daily_limit: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pantrychef=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = GatewayConfig::from_env().context("loading configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(limit) = cli.daily_limit {
        config.chat.daily_message_limit = limit;
    }

    let provider =
        Arc::new(OpenAiProvider::new(config.provider.clone()).context("building LLM provider")?);
    let kitchen = Arc::new(InMemoryKitchen::new());
    let gateway = ChatGateway::new(&config.chat, provider, kitchen);

    let sessions = SessionDirectory::new();
    match &config.auth_token {
        Some(token) => sessions.insert(token.expose_secret(), &config.user_id),
        None => tracing::warn!(
            "PANTRYCHEF_AUTH_TOKEN is not set; all requests run as guests and cannot dispatch actions"
        ),
    }

    let state = Arc::new(GatewayState::new(gateway, sessions));
    start_server(config.bind, Arc::clone(&state))
        .await
        .context("starting web gateway")?;

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    shutdown(&state).await;

    Ok(())
}
