//! # hg-api: Binary Entry Point
//!
//! Starts the HerGenesis HTTP service on `PORT` (default 8080).

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;

use hg_api::{AppConfig, AppState};
use hg_client::{ClientConfig, Collaborators};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading service configuration")?;
    let client_config = ClientConfig::from_env().context("loading collaborator configuration")?;
    tracing::info!(?client_config, "collaborators configured");
    let collaborators = Collaborators::from_config(&client_config)?;

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("installing Prometheus recorder")?;

    let port = config.port;
    let state = AppState::with_config(config, collaborators)?.with_prometheus(prometheus);
    let app = hg_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HerGenesis API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
