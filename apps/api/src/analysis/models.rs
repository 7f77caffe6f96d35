use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::models::{Insights, Prediction, PredictionBundle, Profile, SkillGap};

/// A persisted analysis. Never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input_data: Value,
    pub prediction: Value,
    pub skill_gap: Value,
    pub insights: Value,
    pub prediction_source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed view of a stored analysis, used by the report and chat prompts.
#[derive(Debug, Clone)]
pub struct AnalysisView {
    pub id: Uuid,
    pub input: Profile,
    pub bundle: PredictionBundle,
}

impl AnalysisRow {
    pub fn view(&self) -> Result<AnalysisView, serde_json::Error> {
        Ok(AnalysisView {
            id: self.id,
            input: serde_json::from_value(self.input_data.clone())?,
            bundle: PredictionBundle {
                prediction: serde_json::from_value::<Prediction>(self.prediction.clone())?,
                skill_gap: serde_json::from_value::<SkillGap>(self.skill_gap.clone())?,
                insights: serde_json::from_value::<Insights>(self.insights.clone())?,
            },
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Upper bound on the requested page so the row offset cannot overflow.
pub const MAX_PAGE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// `page` is clamped to 1..=MAX_PAGE; `limit` defaults to 10 and is clamped to 1..=100.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            limit: limit
                .filter(|l| *l > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Total page count for `total` records.
    pub fn pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisPage {
    pub count: usize,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub data: Vec<AnalysisRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::engine::ScoringEngine;
    use crate::scoring::tables::ReferenceTables;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_page_defaults() {
        let page = PageRequest::new(None, None);
        assert_eq!(page, PageRequest { page: 1, limit: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_clamping() {
        assert_eq!(PageRequest::new(Some(0), Some(0)).page, 1);
        assert_eq!(PageRequest::new(Some(-3), Some(-1)).limit, 10);
        assert_eq!(PageRequest::new(Some(2), Some(500)).limit, 100);
        assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn test_huge_page_number_stays_in_range() {
        let page = PageRequest::new(Some(i64::MAX), None);
        assert_eq!(page.page, MAX_PAGE);
        assert_eq!(page.offset(), (MAX_PAGE - 1) * DEFAULT_PAGE_SIZE);

        let page = PageRequest::new(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(page.limit, MAX_PAGE_SIZE);
        assert!(page.offset() > 0);
    }

    #[test]
    fn test_pages_rounds_up() {
        let page = PageRequest::new(Some(1), Some(10));
        assert_eq!(page.pages(0), 0);
        assert_eq!(page.pages(10), 1);
        assert_eq!(page.pages(11), 2);
    }

    #[test]
    fn test_row_serialises_camel_case_and_views_back() {
        let profile = Profile::from_value(&json!({
            "degree": "Computer Science",
            "skills": ["Git"],
            "experience": 2
        }))
        .unwrap();
        let bundle = ScoringEngine::new(Arc::new(ReferenceTables::builtin())).predict(&profile);

        let row = AnalysisRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            input_data: serde_json::to_value(&profile).unwrap(),
            prediction: serde_json::to_value(&bundle.prediction).unwrap(),
            skill_gap: serde_json::to_value(&bundle.skill_gap).unwrap(),
            insights: serde_json::to_value(&bundle.insights).unwrap(),
            prediction_source: "heuristic".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("inputData").is_some());
        assert_eq!(value["skillGap"]["matchingSkills"], json!(["Git"]));

        let view = row.view().unwrap();
        assert_eq!(view.bundle, bundle);
        assert_eq!(view.input, profile);
    }
}
