mod config;
mod document;
mod errors;
mod guidance;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::layout::PageGeometry;
use crate::guidance::advisor::{CareerAdvisor, CompletionSettings};
use crate::llm_client::GroqClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client. A missing key is not fatal: each action
    // reports it to the caller instead.
    let groq = GroqClient::new(
        config.groq_api_key.clone(),
        config.completion_api_url.clone(),
        Duration::from_secs(config.completion_timeout_secs),
    )?;
    if !groq.has_credential() {
        warn!("GROQ_API_KEY is not set; completion actions will fail until it is configured");
    }
    let settings = CompletionSettings {
        model: config.completion_model.clone(),
        temperature: config.completion_temperature,
    };
    info!(
        "Completion client initialized (model: {}, temperature: {})",
        settings.model, settings.temperature
    );

    let page_geometry = PageGeometry::default();

    let state = AppState {
        advisor: CareerAdvisor::new(Arc::new(groq), settings),
        config: config.clone(),
        page_geometry,
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
