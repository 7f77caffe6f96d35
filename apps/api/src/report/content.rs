//! Report content: turns a stored analysis into an ordered list of blocks.
//! Kept separate from PDF drawing so the wording is testable.

use chrono::NaiveDate;

use crate::analysis::models::AnalysisView;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Default,
    Positive,
    Negative,
    Highlight,
    Muted,
}

impl Tone {
    /// RGB in 0.0 – 1.0.
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            Tone::Default => (0.0, 0.0, 0.0),
            Tone::Positive => (0.298, 0.686, 0.314),
            Tone::Negative => (0.957, 0.263, 0.212),
            Tone::Highlight => (0.129, 0.588, 0.953),
            Tone::Muted => (0.4, 0.4, 0.4),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Centered { text: String, size: f32, tone: Tone },
    Heading(String),
    SubHeading { text: String, tone: Tone },
    /// Emphasised single value, e.g. the predicted role.
    Callout(String),
    Text(String),
    Spacer(f32),
    PageBreak,
}

fn text(s: impl Into<String>) -> Block {
    Block::Text(s.into())
}

fn sub(s: &str, tone: Tone) -> Block {
    Block::SubHeading {
        text: s.to_string(),
        tone,
    }
}

/// `75000` → `75,000`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `0.9` → `90.0%`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

pub fn build_blocks(view: &AnalysisView, generated_on: NaiveDate) -> Vec<Block> {
    let input = &view.input;
    let prediction = &view.bundle.prediction;
    let gap = &view.bundle.skill_gap;
    let insights = &view.bundle.insights;
    let salary = &prediction.salary_range;

    let mut blocks = vec![
        Block::Title("Career Outcome Analysis Report".to_string()),
        Block::Centered {
            text: format!("Generated on: {}", generated_on.format("%Y-%m-%d")),
            size: 12.0,
            tone: Tone::Default,
        },
        Block::Spacer(2.0),
        Block::Heading("Your Profile".to_string()),
        text(format!("Degree: {}", input.degree)),
        text(format!("Experience: {} years", input.experience)),
        text(format!("Skills: {}", join_or(&input.skills, "None"))),
        text(format!(
            "Interests: {}",
            join_or(&input.interests, "Not specified")
        )),
        Block::Spacer(1.5),
        Block::Heading("Career Prediction".to_string()),
        Block::Callout(prediction.career_role.clone()),
        text(format!(
            "Probability: {}",
            format_percent(prediction.probability)
        )),
        text(format!(
            "Confidence Level: {}",
            prediction.confidence.as_str()
        )),
        text(format!(
            "Expected Salary Range: ${} - ${}",
            format_thousands(salary.min),
            format_thousands(salary.max)
        )),
        text(format!("Average Salary: ${}", format_thousands(salary.average))),
        Block::Spacer(1.5),
    ];

    if !prediction.alternative_careers.is_empty() {
        blocks.push(sub("Alternative Career Paths:", Tone::Default));
        for (i, alt) in prediction.alternative_careers.iter().enumerate() {
            blocks.push(text(format!(
                "{}. {} - Match: {}",
                i + 1,
                alt.role,
                format_percent(alt.probability)
            )));
        }
        blocks.push(Block::Spacer(1.5));
    }

    blocks.push(Block::PageBreak);
    blocks.push(Block::Heading("Skill Gap Analysis".to_string()));
    blocks.push(text(format!("Overall Skill Match: {}%", gap.overall_match)));
    blocks.push(Block::Spacer(1.0));

    if !gap.matching_skills.is_empty() {
        blocks.push(sub("Your Matching Skills:", Tone::Positive));
        blocks.push(text(gap.matching_skills.join(", ")));
        blocks.push(Block::Spacer(1.0));
    }

    if !gap.missing_skills.is_empty() {
        blocks.push(sub("Skills to Acquire:", Tone::Negative));
        for item in &gap.missing_skills {
            blocks.push(text(format!(
                "- {} ({}) - Impact: +{}%",
                item.skill,
                item.importance.as_str(),
                item.impact_on_success
            )));
        }
        blocks.push(Block::Spacer(1.0));
    }

    if !gap.recommended_skills.is_empty() {
        blocks.push(sub("Recommended Skills:", Tone::Highlight));
        for (i, item) in gap.recommended_skills.iter().enumerate() {
            blocks.push(text(format!("{}. {} - {}", i + 1, item.skill, item.reason)));
        }
        blocks.push(Block::Spacer(1.5));
    }

    blocks.push(Block::Heading("Market Insights".to_string()));
    blocks.push(text(format!(
        "Market Demand: {}",
        insights.market_demand.as_str()
    )));
    blocks.push(text(format!(
        "Growth Potential: {}",
        insights.growth_potential.as_str()
    )));
    blocks.push(Block::Spacer(1.0));

    if !insights.recommendations.is_empty() {
        blocks.push(sub("Recommendations:", Tone::Default));
        for (i, rec) in insights.recommendations.iter().enumerate() {
            blocks.push(text(format!("{}. {rec}", i + 1)));
        }
        blocks.push(Block::Spacer(1.0));
    }

    if !insights.industry_trends.is_empty() {
        blocks.push(sub("Industry Trends:", Tone::Default));
        for trend in &insights.industry_trends {
            blocks.push(text(format!("- {trend}")));
        }
    }

    blocks.push(Block::Spacer(2.0));
    for line in [
        "This report is generated by Career Outcome Analysis System",
        "For educational and career planning purposes",
    ] {
        blocks.push(Block::Centered {
            text: line.to_string(),
            size: 9.0,
            tone: Tone::Muted,
        });
    }

    blocks
}
