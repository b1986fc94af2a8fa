mod analysis;
mod career;
mod config;
mod dataset;
mod errors;
mod llm_client;
mod media;
mod parsing;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dataset::DatasetIndex;
use crate::llm_client::{timeout::TimeoutGateway, GeminiClient};
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting CareerLens API v{}", env!("CARGO_PKG_VERSION"));

    // Load the job/skill dataset once; a missing file leaves an empty index
    let dataset = DatasetIndex::load(&config.dataset_path);
    info!(
        "Dataset loaded: {} records, {} job roles",
        dataset.len(),
        dataset.job_roles().len()
    );

    // Initialize LLM gateway
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_endpoint.clone(),
    )
    .context("Failed to build Gemini HTTP client")?;
    info!(
        "LLM gateway initialized (model: {}, timeout: {:?})",
        gemini.model(),
        config.llm_timeout
    );
    let gateway = Arc::new(TimeoutGateway::new(gemini, config.llm_timeout));

    let state = AppState {
        dataset: Arc::new(dataset),
        gateway,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
