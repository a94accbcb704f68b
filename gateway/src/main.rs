use std::sync::Arc;

use anyhow::Context;
use gateway::{logging, GatewayConfig, LogFormat};
use gateway_core::EmptyRouteTable;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = dotenvy::dotenv();

    logging::init(LogFormat::from_env()).context("failed to initialise logging")?;

    match env_file {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable environment file"),
    }

    let config = Arc::new(GatewayConfig::from_env());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    tracing::info!(port = config.port, "Server running");
    tracing::info!(environment = %config.environment, "Environment");
    tracing::info!(url = %config.api_base_url(), "API available");

    gateway::run(listener, config, Arc::new(EmptyRouteTable)).await?;

    Ok(())
}
