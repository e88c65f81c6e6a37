//! LLM Relay Server - Main entry point
//!
//! This binary creates and runs the HTTP server that forwards all traffic to
//! the configured upstream provider. Configuration comes from environment
//! variables (see [`llm_relay_rust::core::config`]).

use anyhow::Result;
use llm_relay_rust::{build_router, AppConfig, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env()?;
    let http_client = create_http_client();

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address: {}", e))?;
    let upstream_base = config.upstream.api_base.clone();

    let state = Arc::new(AppState::new(config, http_client));
    let app = build_router(state);

    tracing::info!("Starting LLM relay on {}", addr);
    tracing::info!("Chat endpoint: POST /v1/chat/completions");
    tracing::info!("All other paths forwarded to {}", upstream_base);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with an env-driven filter.
///
/// Noise-suppression filters for hyper/h2/reqwest are always appended so a
/// plain `RUST_LOG=debug` does not let chunked-transfer trace logs through.
fn init_tracing() {
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,llm_relay_rust=debug".to_string());
    let filter_str = format!("{},hyper=warn,h2=warn,reqwest=warn", base_filter);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter_str))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the shared HTTP client with connection pooling.
///
/// Only a connect timeout is set: relayed bodies may stream for minutes, so
/// a total request timeout would cut long responses off mid-stream.
fn create_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(100)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .expect("Failed to build HTTP client")
}
