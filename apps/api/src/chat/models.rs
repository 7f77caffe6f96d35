use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::models::AnalysisRow;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub message: String,
    /// Analysis the user is currently looking at, in stored-analysis shape.
    #[serde(default)]
    pub analysis_context: Option<AnalysisContext>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis context
//
// Lenient mirror of a stored analysis: every field is optional so a partial
// client-side object still yields a usable prompt.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisContext {
    pub input_data: ContextInput,
    pub prediction: ContextPrediction,
    pub skill_gap: ContextSkillGap,
    pub insights: ContextInsights,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextInput {
    pub degree: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextPrediction {
    pub career_role: Option<String>,
    pub probability: Option<f64>,
    pub confidence: Option<String>,
    pub salary_range: Option<ContextSalary>,
    pub alternative_careers: Vec<ContextAlternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextSalary {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextAlternative {
    pub role: String,
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextSkillGap {
    pub overall_match: Option<f64>,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<ContextMissingSkill>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContextMissingSkill {
    pub skill: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextInsights {
    pub market_demand: Option<String>,
    pub growth_potential: Option<String>,
}

impl AnalysisContext {
    /// Re-reads a stored row through its JSON wire shape.
    pub fn from_row(row: &AnalysisRow) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(row)?)
    }
}
