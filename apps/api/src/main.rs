mod analysis;
mod chat;
mod config;
mod db;
mod errors;
mod llm_client;
mod ml_client;
mod report;
mod resume;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::ml_client::MlServiceClient;
use crate::routes::build_router;
use crate::scoring::engine::ScoringEngine;
use crate::scoring::predictor::{CareerPredictor, HeuristicPredictor, MlServicePredictor};
use crate::scoring::tables::ReferenceTables;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Scoring tables: JSON override or built-ins
    let tables = match &config.scoring_tables_path {
        Some(path) => {
            let tables = ReferenceTables::from_json_file(path)
                .with_context(|| format!("Failed to load scoring tables from {}", path.display()))?;
            info!("Scoring tables loaded from {}", path.display());
            tables
        }
        None => ReferenceTables::builtin(),
    };
    let engine = ScoringEngine::new(Arc::new(tables));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Prediction backend: ML service with heuristic fallback, or heuristic only
    let predictor: Arc<dyn CareerPredictor> = match &config.ml_service_url {
        Some(url) => {
            let client = MlServiceClient::new(url, config.ml_service_timeout)?;
            info!("ML service configured at {}", client.base_url());
            Arc::new(MlServicePredictor::new(client, engine.clone()))
        }
        None => Arc::new(HeuristicPredictor::new(engine.clone())),
    };
    info!("Prediction backend: {}", predictor.backend());

    let state = AppState {
        db,
        llm,
        predictor,
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
