//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::{AnalysisPage, AnalysisRow, PageRequest};
use crate::analysis::repository::{
    count_analyses_for_user, delete_analysis, find_analysis, insert_analysis,
    list_analyses_for_user,
};
use crate::errors::AppError;
use crate::report::render_report;
use crate::scoring::models::{CareerDescriptor, Comparison, Profile};
use crate::scoring::predictor::PredictionSource;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateAnalysisRequest {
    pub user_id: Uuid,
    /// Raw profile fields; coerced into a `Profile` after presence checks.
    #[serde(flatten)]
    pub profile: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    /// Unparseable values fall back to the defaults instead of rejecting the request.
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<i64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<i64>().ok()))
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub career1: Option<CareerDescriptor>,
    pub career2: Option<CareerDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub comparison: Comparison,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub source: PredictionSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Predicts (ML service first, heuristic fallback) and stores the result.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<CreateAnalysisRequest>,
) -> Result<(StatusCode, Json<AnalysisRow>), AppError> {
    let profile = validate_profile(&request.profile)?;

    let outcome = state.predictor.predict(&profile).await?;
    info!(
        "Predicted '{}' for user {} via {}",
        outcome.bundle.prediction.career_role,
        request.user_id,
        outcome.source.as_str()
    );

    let row = insert_analysis(&state.db, request.user_id, &profile, &outcome).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/analysis?user_id=&page=&limit=
pub async fn handle_analysis_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<AnalysisPage>, AppError> {
    let page = PageRequest::new(params.page, params.limit);

    let data = list_analyses_for_user(&state.db, params.user_id, page).await?;
    let total = count_analyses_for_user(&state.db, params.user_id).await?;

    Ok(Json(AnalysisPage {
        count: data.len(),
        total,
        page: page.page,
        pages: page.pages(total),
        data,
    }))
}

/// GET /api/v1/analysis/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row = load_owned(&state, id, params.user_id, "access").await?;
    Ok(Json(row))
}

/// DELETE /api/v1/analysis/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DeleteResponse>, AppError> {
    load_owned(&state, id, params.user_id, "delete").await?;
    if !delete_analysis(&state.db, id).await? {
        return Err(AppError::NotFound("Analysis not found".to_string()));
    }
    info!("Deleted analysis {id} for user {}", params.user_id);
    Ok(Json(DeleteResponse {
        message: "Analysis deleted successfully".to_string(),
    }))
}

/// POST /api/v1/analysis/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    let (Some(career1), Some(career2)) = (request.career1, request.career2) else {
        return Err(AppError::Validation(
            "Please provide two career paths to compare".to_string(),
        ));
    };
    Ok(Json(CompareResponse {
        comparison: state.engine.compare(&career1, &career2),
    }))
}

/// GET /api/v1/analysis/:id/report
///
/// Streams the analysis as a PDF attachment.
pub async fn handle_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let row = load_owned(&state, id, params.user_id, "access").await?;
    let view = row
        .view()
        .map_err(|e| AppError::Report(format!("Stored analysis {id} is malformed: {e}")))?;

    let pdf = render_report(&view, Utc::now().date_naive())
        .map_err(|e| AppError::Report(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=career-analysis-{id}.pdf"),
            ),
        ],
        pdf,
    ))
}

/// GET /api/v1/skills
pub async fn handle_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let (skills, source) = state.predictor.skills().await;
    Json(SkillsResponse { skills, source })
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Presence check on the raw body, then structural coercion.
fn validate_profile(raw: &serde_json::Map<String, Value>) -> Result<Profile, AppError> {
    let present = |key: &str| raw.get(key).map_or(false, |v| !v.is_null());
    let degree_given = raw
        .get("degree")
        .and_then(Value::as_str)
        .map_or(present("degree"), |d| !d.trim().is_empty());

    if !degree_given || !present("skills") || !present("experience") {
        return Err(AppError::Validation(
            "Please provide degree, skills, and experience".to_string(),
        ));
    }

    Ok(Profile::from_value(&Value::Object(raw.clone()))?)
}

/// Fetches an analysis and enforces ownership: 404 if absent, 403 if foreign.
async fn load_owned(
    state: &AppState,
    id: Uuid,
    user_id: Uuid,
    action: &str,
) -> Result<AnalysisRow, AppError> {
    let row = find_analysis(&state.db, id).await?;
    check_owner(row, user_id, action)
}

fn check_owner(
    row: Option<AnalysisRow>,
    user_id: Uuid,
    action: &str,
) -> Result<AnalysisRow, AppError> {
    let row = row.ok_or_else(|| AppError::NotFound("Analysis not found".to_string()))?;
    if row.user_id != user_id {
        return Err(AppError::Forbidden(format!(
            "Not authorized to {action} this analysis"
        )));
    }
    Ok(row)
}
