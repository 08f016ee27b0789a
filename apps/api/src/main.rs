mod ai_client;
mod config;
mod errors;
mod models;
mod routes;
mod state;
mod transparency;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::AiClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::transparency::TransparencyService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting transparency microservice v{}",
        env!("CARGO_PKG_VERSION")
    );

    let ai = AiClient::from_config(&config);
    match ai.active_provider() {
        Some(provider) => info!("AI provider configured: {}", provider.name()),
        None => info!("No AI API keys found, using local fallback logic"),
    }

    let service = TransparencyService::new(ai);
    let state = AppState {
        service: Arc::new(service),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the form frontend calls from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
