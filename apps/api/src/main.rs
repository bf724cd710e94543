mod advisor_client;
mod assessment;
mod auth;
mod catalog;
mod config;
mod courses;
mod db;
mod errors;
mod models;
mod profile;
mod quiz;
mod roadmap;
mod routes;
mod state;
mod summary;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor_client::HttpAdvisorClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::profile::store::ProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillPath API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (user accounts)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed profile store (sessions + cross-step flow state)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let store = ProfileStore::new(redis);
    info!("Profile store initialized");

    // Initialize the upstream advisor client (quiz + roadmap generation)
    let advisor = Arc::new(HttpAdvisorClient::new(config.advisor_url.clone()));
    info!("Advisor client initialized (base: {})", config.advisor_url);

    // Build app state
    let state = AppState::new(db, store, advisor, config.clone());

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict to the known frontend origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
