pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::chat::handlers as chat;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analysis",
            post(analysis::handle_create_analysis).get(analysis::handle_analysis_history),
        )
        .route("/api/v1/analysis/compare", post(analysis::handle_compare))
        .route(
            "/api/v1/analysis/:id",
            get(analysis::handle_get_analysis).delete(analysis::handle_delete_analysis),
        )
        .route("/api/v1/analysis/:id/report", get(analysis::handle_report))
        .route("/api/v1/skills", get(analysis::handle_skills))
        // Resume API
        .route(
            "/api/v1/resume/parse",
            post(resume::handle_parse_resume)
                .layer(DefaultBodyLimit::max(resume::MAX_RESUME_BYTES)),
        )
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        .with_state(state)
}
