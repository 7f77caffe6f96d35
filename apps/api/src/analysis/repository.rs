use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::{AnalysisRow, PageRequest};
use crate::scoring::models::Profile;
use crate::scoring::predictor::PredictionOutcome;

/// Inserts a new analysis and returns the stored row.
pub async fn insert_analysis(
    pool: &PgPool,
    user_id: Uuid,
    profile: &Profile,
    outcome: &PredictionOutcome,
) -> Result<AnalysisRow, sqlx::Error> {
    let row = sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO analyses
            (id, user_id, input_data, prediction, skill_gap, insights, prediction_source)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(Json(profile))
    .bind(Json(&outcome.bundle.prediction))
    .bind(Json(&outcome.bundle.skill_gap))
    .bind(Json(&outcome.bundle.insights))
    .bind(outcome.source.as_str())
    .fetch_one(pool)
    .await?;

    info!(
        "Stored analysis {} for user {user_id} ({})",
        row.id, row.prediction_source
    );
    Ok(row)
}

/// Newest-first page of a user's analyses.
pub async fn list_analyses_for_user(
    pool: &PgPool,
    user_id: Uuid,
    page: PageRequest,
) -> Result<Vec<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>(
        r#"
        SELECT * FROM analyses
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool)
    .await
}

pub async fn count_analyses_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM analyses WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn find_analysis(pool: &PgPool, id: Uuid) -> Result<Option<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn latest_analysis_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Whole-record removal. Returns whether a row was deleted.
pub async fn delete_analysis(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM analyses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
