mod applications;
mod companies;
mod config;
mod dashboard;
mod errors;
mod extract;
mod jobs;
mod models;
mod profile;
mod recommendation;
mod routes;
mod saved_jobs;
mod seed;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::seed::load_seed_data;
use crate::state::{AppState, Stores};
use crate::store::Latency;

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

    info!("Starting JobHunt API v{}", env!("CARGO_PKG_VERSION"));

    let seed = load_seed_data(config.seed_data_dir.as_deref())?;

    let latency = Latency::scaled(config.store_latency_scale);
    info!(
        scale = config.store_latency_scale,
        get_all_ms = latency.get_all.as_millis() as u64,
        "Simulated store latency"
    );

    let stores = Stores::in_memory(seed, latency);
    let state = AppState::new(&config, stores);
    info!(limit = config.recommendation_limit, "Recommender ready");

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
