use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and which prediction backend is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let predictor = state.predictor.health().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-api",
        "predictor": predictor,
    }))
}
