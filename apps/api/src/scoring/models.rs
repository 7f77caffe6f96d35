//! Data models for the career scoring engine.
//!
//! Every type serialises in camelCase so a `PredictionBundle` produced here is
//! interchangeable with the one returned by the external ML service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scoring::ScoringError;

// ────────────────────────────────────────────────────────────────────────────
// Input
// ────────────────────────────────────────────────────────────────────────────

/// Normalized user profile fed to the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub degree: String,
    pub skills: Vec<String>,
    /// Years of experience.
    pub experience: u32,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
}

impl Profile {
    /// Coerces a loosely-typed JSON object into a `Profile`.
    ///
    /// Defaults: `interests` and `certifications` become `[]`, `education`
    /// becomes the degree. Duplicate skills are dropped, first occurrence wins.
    pub fn from_value(value: &Value) -> Result<Self, ScoringError> {
        let obj = value
            .as_object()
            .ok_or_else(|| invalid("profile must be a JSON object"))?;

        let degree = obj
            .get("degree")
            .and_then(Value::as_str)
            .ok_or_else(|| invalid("degree must be a string"))?
            .to_string();

        let skills = obj
            .get("skills")
            .ok_or_else(|| invalid("skills must be an array of strings"))
            .and_then(|v| string_list(v, "skills"))?;

        let experience = obj
            .get("experience")
            .ok_or_else(|| invalid("experience must be a non-negative integer"))
            .and_then(coerce_experience)?;

        let interests = optional_list(obj.get("interests"), "interests")?;
        let certifications = optional_list(obj.get("certifications"), "certifications")?;

        let education = match obj.get("education") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => return Err(invalid("education must be a string")),
        }
        .or_else(|| Some(degree.clone()));

        Ok(Profile {
            degree,
            skills,
            experience,
            interests,
            education,
            certifications,
        })
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

fn invalid(msg: &str) -> ScoringError {
    ScoringError::InvalidInput(msg.to_string())
}

fn string_list(value: &Value, field: &str) -> Result<Vec<String>, ScoringError> {
    let arr = value
        .as_array()
        .ok_or_else(|| ScoringError::InvalidInput(format!("{field} must be an array of strings")))?;

    let mut out: Vec<String> = Vec::with_capacity(arr.len());
    for item in arr {
        let s = item.as_str().ok_or_else(|| {
            ScoringError::InvalidInput(format!("{field} must contain only strings"))
        })?;
        // Matching is exact, so entries are stored as sent; only blank ones are dropped.
        if s.trim().is_empty() || out.iter().any(|existing| existing == s) {
            continue;
        }
        out.push(s.to_string());
    }
    Ok(out)
}

fn optional_list(value: Option<&Value>, field: &str) -> Result<Vec<String>, ScoringError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => string_list(v, field),
    }
}

/// Accepts a JSON integer, an integral float, or a numeric string (HTML forms
/// submit numbers as text).
fn coerce_experience(value: &Value) -> Result<u32, ScoringError> {
    let err = || invalid("experience must be a non-negative integer");
    let years = match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u
            } else {
                let f = n.as_f64().ok_or_else(err)?;
                if f < 0.0 || f.fract() != 0.0 {
                    return Err(err());
                }
                f as u64
            }
        }
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| err())?,
        _ => return Err(err()),
    };
    u32::try_from(years).map_err(|_| err())
}

// ────────────────────────────────────────────────────────────────────────────
// Prediction output
// ────────────────────────────────────────────────────────────────────────────

/// Coarse bucket derived from the matching-skill ratio.
///
/// `Low` is part of the stored schema but no current rule produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub average: u64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeCareer {
    pub role: String,
    pub probability: f64,
    pub match_score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub career_role: String,
    pub probability: f64,
    pub confidence: Confidence,
    pub salary_range: SalaryRange,
    pub alternative_careers: Vec<AlternativeCareer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    Critical,
    Important,
    #[serde(rename = "Nice-to-have")]
    NiceToHave,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Critical => "Critical",
            Importance::Important => "Important",
            Importance::NiceToHave => "Nice-to-have",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub skill: String,
    pub importance: Importance,
    pub impact_on_success: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSkill {
    pub skill: String,
    pub reason: String,
    pub priority: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<MissingSkill>,
    pub recommended_skills: Vec<RecommendedSkill>,
    /// 0 – 100
    pub overall_match: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketDemand {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl MarketDemand {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketDemand::Low => "Low",
            MarketDemand::Medium => "Medium",
            MarketDemand::High => "High",
            MarketDemand::VeryHigh => "Very High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthPotential {
    Low,
    Medium,
    High,
}

impl GrowthPotential {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthPotential::Low => "Low",
            GrowthPotential::Medium => "Medium",
            GrowthPotential::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub market_demand: MarketDemand,
    pub growth_potential: GrowthPotential,
    pub recommendations: Vec<String>,
    pub industry_trends: Vec<String>,
}

/// Full output of a prediction: the shape persisted per analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBundle {
    pub prediction: Prediction,
    pub skill_gap: SkillGap,
    pub insights: Insights,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career comparison
// ────────────────────────────────────────────────────────────────────────────

/// Caller-supplied career; every field is optional and defaulted per side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDescriptor {
    pub role: Option<String>,
    pub avg_salary: Option<f64>,
    pub growth_rate: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// A career with every field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub role: String,
    pub avg_salary: f64,
    pub growth_rate: String,
    pub required_skills: Vec<String>,
}

impl CareerSummary {
    /// Defaults applied to the first career of a comparison.
    pub fn first_default() -> Self {
        Self {
            role: "Software Engineer".to_string(),
            avg_salary: 95_000.0,
            growth_rate: "15%".to_string(),
            required_skills: vec![
                "JavaScript".to_string(),
                "React".to_string(),
                "Node.js".to_string(),
            ],
        }
    }

    /// Defaults applied to the second career of a comparison.
    pub fn second_default() -> Self {
        Self {
            role: "Data Scientist".to_string(),
            avg_salary: 110_000.0,
            growth_rate: "18%".to_string(),
            required_skills: vec![
                "Python".to_string(),
                "Machine Learning".to_string(),
                "Statistics".to_string(),
            ],
        }
    }
}

impl CareerDescriptor {
    /// Fills each missing (or empty / zero) field from `defaults` independently.
    pub fn resolve(&self, defaults: CareerSummary) -> CareerSummary {
        CareerSummary {
            role: self
                .role
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or(defaults.role),
            avg_salary: self
                .avg_salary
                .filter(|s| *s != 0.0 && !s.is_nan())
                .unwrap_or(defaults.avg_salary),
            growth_rate: self
                .growth_rate
                .clone()
                .filter(|g| !g.is_empty())
                .unwrap_or(defaults.growth_rate),
            required_skills: self.skills.clone().unwrap_or(defaults.required_skills),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonInsights {
    pub salary_difference: f64,
    pub better_growth: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub career1: CareerSummary,
    pub career2: CareerSummary,
    pub insights: ComparisonInsights,
}
