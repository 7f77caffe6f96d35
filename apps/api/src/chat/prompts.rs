// User prompts for the career assistant. System prompt lives in llm_client::prompts.

use crate::chat::models::AnalysisContext;
use crate::report::content::{format_percent, format_thousands};

const UNKNOWN: &str = "Unknown";

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

fn percent(probability: Option<f64>) -> String {
    probability.map_or_else(|| UNKNOWN.to_string(), format_percent)
}

fn money(value: Option<f64>) -> String {
    let whole = value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0);
    format_thousands(whole.round() as u64)
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Prompt grounded in the analysis the user is viewing.
pub fn build_context_prompt(ctx: &AnalysisContext, message: &str) -> String {
    let input = &ctx.input_data;
    let prediction = &ctx.prediction;
    let gap = &ctx.skill_gap;
    let salary = prediction.salary_range.clone().unwrap_or_default();

    let missing: Vec<String> = gap.missing_skills.iter().map(|m| m.skill.clone()).collect();
    let alternatives = if prediction.alternative_careers.is_empty() {
        "None".to_string()
    } else {
        prediction
            .alternative_careers
            .iter()
            .map(|c| format!("- {} ({})", c.role, percent(c.probability)))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are helping a user understand their career analysis.

User Profile:
- Degree: {degree}
- Skills: {skills}
- Experience: {experience} years

Career Analysis Results:
- Predicted Role: {role}
- Match Probability: {probability}
- Confidence: {confidence}
- Salary Range: ${min} - ${max}

Skill Gap Analysis:
- Overall Match: {overall}%
- Matching Skills: {matching}
- Missing Skills: {missing}

Alternative Career Paths:
{alternatives}

Market Insights:
- Market Demand: {demand}
- Growth Potential: {growth}

User Question:
{message}

Provide a helpful, specific answer based on this analysis data. Be encouraging and actionable.",
        degree = input.degree.as_deref().unwrap_or("Not specified"),
        skills = if input.skills.is_empty() {
            "Not specified".to_string()
        } else {
            input.skills.join(", ")
        },
        experience = input.experience.unwrap_or(0.0),
        role = or_unknown(&prediction.career_role),
        probability = percent(prediction.probability),
        confidence = or_unknown(&prediction.confidence),
        min = money(salary.min),
        max = money(salary.max),
        overall = gap.overall_match.unwrap_or(0.0),
        matching = list_or_none(&gap.matching_skills),
        missing = list_or_none(&missing),
        demand = or_unknown(&ctx.insights.market_demand),
        growth = or_unknown(&ctx.insights.growth_potential),
    )
}

/// Prompt for a free question, summarising the user's latest analysis if any.
pub fn build_general_prompt(latest: Option<&AnalysisContext>, message: &str) -> String {
    let summary = match latest {
        Some(ctx) => format!(
            "- Predicted Role: {}\n- Match Probability: {}\n- Overall Skill Match: {}%\n- Market Demand: {}",
            or_unknown(&ctx.prediction.career_role),
            percent(ctx.prediction.probability),
            ctx.skill_gap.overall_match.unwrap_or(0.0),
            or_unknown(&ctx.insights.market_demand),
        ),
        None => "No previous analysis".to_string(),
    };

    format!(
        "Latest Career Analysis:
{summary}

User Question:
{message}

Give structured, helpful advice."
    )
}
