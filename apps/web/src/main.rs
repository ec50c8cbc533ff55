mod board;
mod config;
mod errors;
mod models;
mod routes;
mod state;
mod upstream;
mod views;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::upstream::api::HttpJobApi;
use crate::upstream::UpstreamClient;
use crate::views::Templates;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobboard v{}", env!("CARGO_PKG_VERSION"));

    let upstream = UpstreamClient::new(
        config.upstream_url.clone(),
        config.shared_secret.clone(),
        config.upstream_timeout,
    )
    .context("Failed to build upstream HTTP client")?;
    info!(
        "Upstream client initialized ({}, timeout {}s)",
        config.upstream_url,
        config.upstream_timeout.as_secs()
    );

    let templates = Templates::load(&config.template_dir, config.template_dev_mode)
        .with_context(|| {
            format!("Failed to load templates from {}", config.template_dir.display())
        })?;
    info!("Templates loaded from {}", config.template_dir.display());

    let state = AppState {
        config: config.clone(),
        jobs: Arc::new(HttpJobApi::new(upstream)),
        templates: Arc::new(templates),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Could not bind {addr}: {e}");
            return Err(e).with_context(|| format!("Failed to bind {addr}"));
        }
    };
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
