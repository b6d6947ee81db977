use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use marketplace_api::{app, cli::Cli, config::AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marketplace_api=debug,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    cli.load_env_file();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    cli.apply(&mut config);
    tracing::info!("Starting marketplace API in {:?} mode", config.environment);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::from_config(config)?;
    tracing::info!("Issued tokens stay valid for {} days", state.envelope.ttl().num_days());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Marketplace API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
