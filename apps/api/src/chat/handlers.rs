//! Axum route handler for the career assistant.

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::analysis::repository::latest_analysis_for_user;
use crate::chat::models::{AnalysisContext, ChatRequest, ChatResponse};
use crate::chat::prompts::{build_context_prompt, build_general_prompt};
use crate::errors::AppError;
use crate::llm_client::prompts::CAREER_ADVISOR_SYSTEM;
use crate::state::AppState;

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    let prompt = match &request.analysis_context {
        Some(ctx) => build_context_prompt(ctx, message),
        None => {
            let latest = latest_analysis_for_user(&state.db, request.user_id)
                .await?
                .and_then(|row| match AnalysisContext::from_row(&row) {
                    Ok(ctx) => Some(ctx),
                    Err(e) => {
                        warn!("Stored analysis {} unusable as chat context: {e}", row.id);
                        None
                    }
                });
            build_general_prompt(latest.as_ref(), message)
        }
    };

    info!(
        "Chat request from user {} (context supplied: {}, prompt {} chars)",
        request.user_id,
        request.analysis_context.is_some(),
        prompt.len()
    );

    let reply = state
        .llm
        .complete(&prompt, CAREER_ADVISOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(Json(ChatResponse { reply }))
}
