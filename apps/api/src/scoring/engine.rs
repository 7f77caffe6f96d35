//! Heuristic career scoring engine.
//!
//! Stateless and deterministic: the only inputs are the profile and the
//! reference tables injected at construction. Stands in for the external ML
//! service when it is unavailable, and produces the same JSON shape.

use std::sync::Arc;

use crate::scoring::models::{
    AlternativeCareer, CareerDescriptor, CareerSummary, Comparison, ComparisonInsights,
    Confidence, GrowthPotential, Importance, Insights, MarketDemand, MissingSkill, Prediction,
    PredictionBundle, Profile, RecommendedSkill, SalaryRange, SkillGap,
};
use crate::scoring::tables::{default_required_skills, ReferenceTables};

const BASE_PROBABILITY: f64 = 0.75;
const PROBABILITY_PER_MATCH: f64 = 0.03;
/// Share of required skills a profile must hold for `High` confidence.
const HIGH_CONFIDENCE_RATIO: f64 = 0.6;

const CRITICAL_SKILL_COUNT: usize = 3;
const MAX_RECOMMENDED_SKILLS: usize = 5;
/// `Focus on acquiring ...` lists at most this many missing skills.
const FOCUS_SKILL_COUNT: usize = 3;
/// Above this many years the market demand is `High`.
const SENIOR_EXPERIENCE_YEARS: u32 = 3;

const CURRENCY: &str = "USD";

const INDUSTRY_TRENDS: [&str; 3] = [
    "AI and ML integration is trending",
    "Cloud computing skills are in high demand",
    "Remote work opportunities expanding",
];

const COMPARISON_RECOMMENDATION: &str = "Both careers show strong potential. \
    Choose based on your interest in coding vs. data analysis.";

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    tables: Arc<ReferenceTables>,
}

impl ScoringEngine {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Scores a profile against the reference tables.
    ///
    /// Unknown degrees and roles fall back to the table defaults, so every
    /// well-formed profile produces a full bundle.
    pub fn predict(&self, profile: &Profile) -> PredictionBundle {
        let (primary_role, alternates) = self.tables.roles_for(&profile.degree);
        // An unrecognised degree gets the generic skill list, not the row of
        // whatever default role it landed on.
        let required = if self.tables.knows_degree(&profile.degree) {
            self.tables.required_skills(&primary_role)
        } else {
            default_required_skills()
        };

        let (matching, missing): (Vec<String>, Vec<String>) = required
            .iter()
            .cloned()
            .partition(|skill| profile.has_skill(skill));

        let prediction = Prediction {
            career_role: primary_role.clone(),
            probability: probability(matching.len()),
            confidence: confidence(matching.len(), required.len()),
            salary_range: salary_range(profile.experience),
            alternative_careers: alternative_careers(&alternates),
        };

        let skill_gap = SkillGap {
            overall_match: overall_match(matching.len(), required.len()),
            missing_skills: annotate_missing(&missing),
            recommended_skills: recommend(&missing, &primary_role),
            matching_skills: matching,
        };

        let insights = insights(profile.experience, &missing);

        PredictionBundle {
            prediction,
            skill_gap,
            insights,
        }
    }

    /// Compares two careers, defaulting absent fields per side.
    pub fn compare(&self, first: &CareerDescriptor, second: &CareerDescriptor) -> Comparison {
        compare_careers(first, second)
    }
}

/// `0.75 + 0.03 · matches`, capped at 1.0.
fn probability(matches: usize) -> f64 {
    (BASE_PROBABILITY + PROBABILITY_PER_MATCH * matches as f64).min(1.0)
}

fn confidence(matches: usize, required: usize) -> Confidence {
    if required > 0 && matches as f64 >= required as f64 * HIGH_CONFIDENCE_RATIO {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

fn overall_match(matches: usize, required: usize) -> u32 {
    if required == 0 {
        return 0;
    }
    ((matches as f64 / required as f64) * 100.0).round() as u32
}

fn salary_range(experience: u32) -> SalaryRange {
    let years = u64::from(experience);
    SalaryRange {
        min: 60_000 + 5_000 * years,
        max: 100_000 + 10_000 * years,
        average: 80_000 + 7_500 * years,
        currency: CURRENCY.to_string(),
    }
}

fn alternative_careers(alternates: &[String]) -> Vec<AlternativeCareer> {
    alternates
        .iter()
        .enumerate()
        .map(|(rank, role)| AlternativeCareer {
            role: role.clone(),
            probability: 0.65 - 0.1 * rank as f64,
            match_score: 75 - 10 * rank as i32,
        })
        .collect()
}

fn annotate_missing(missing: &[String]) -> Vec<MissingSkill> {
    missing
        .iter()
        .enumerate()
        .map(|(idx, skill)| MissingSkill {
            skill: skill.clone(),
            importance: if idx < CRITICAL_SKILL_COUNT {
                Importance::Critical
            } else {
                Importance::Important
            },
            impact_on_success: 15 - 2 * idx as i32,
        })
        .collect()
}

fn recommend(missing: &[String], role: &str) -> Vec<RecommendedSkill> {
    missing
        .iter()
        .take(MAX_RECOMMENDED_SKILLS)
        .enumerate()
        .map(|(idx, skill)| RecommendedSkill {
            skill: skill.clone(),
            reason: format!("Essential for {role} role"),
            priority: MAX_RECOMMENDED_SKILLS as i32 - idx as i32,
        })
        .collect()
}

fn insights(experience: u32, missing: &[String]) -> Insights {
    let focus: Vec<&str> = missing
        .iter()
        .take(FOCUS_SKILL_COUNT)
        .map(String::as_str)
        .collect();

    Insights {
        market_demand: if experience > SENIOR_EXPERIENCE_YEARS {
            MarketDemand::High
        } else {
            MarketDemand::Medium
        },
        growth_potential: GrowthPotential::High,
        recommendations: vec![
            format!("Focus on acquiring {}", focus.join(", ")),
            "Consider building a portfolio of projects".to_string(),
            "Network with professionals in your target role".to_string(),
        ],
        industry_trends: INDUSTRY_TRENDS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Pure comparison of two careers.
///
/// `betterGrowth` compares the growth-rate strings lexicographically, so
/// `"9%"` beats `"18%"`. Kept for parity with the stored history.
pub fn compare_careers(first: &CareerDescriptor, second: &CareerDescriptor) -> Comparison {
    let career1 = first.resolve(CareerSummary::first_default());
    let career2 = second.resolve(CareerSummary::second_default());

    let better_growth = if career2.growth_rate > career1.growth_rate {
        career2.role.clone()
    } else {
        career1.role.clone()
    };

    Comparison {
        insights: ComparisonInsights {
            salary_difference: (career1.avg_salary - career2.avg_salary).abs(),
            better_growth,
            recommendation: COMPARISON_RECOMMENDATION.to_string(),
        },
        career1,
        career2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::scoring::ScoringError;

    fn make_engine() -> ScoringEngine {
        ScoringEngine::new(Arc::new(ReferenceTables::builtin()))
    }

    fn make_profile(degree: &str, skills: &[&str], experience: u32) -> Profile {
        Profile {
            degree: degree.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience,
            interests: vec![],
            education: Some(degree.to_string()),
            certifications: vec![],
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_computer_science_example() {
        let bundle = make_engine().predict(&make_profile(
            "Computer Science",
            &["JavaScript", "Python", "Git", "Docker", "SQL"],
            2,
        ));

        assert_eq!(bundle.prediction.career_role, "Software Engineer");
        assert_eq!(
            bundle.skill_gap.matching_skills,
            vec!["JavaScript", "Python", "Git", "Docker", "SQL"]
        );
        let missing: Vec<&str> = bundle
            .skill_gap
            .missing_skills
            .iter()
            .map(|m| m.skill.as_str())
            .collect();
        assert_eq!(missing, vec!["REST APIs", "Agile"]);
        assert_eq!(bundle.skill_gap.overall_match, 71);
        assert_eq!(bundle.prediction.confidence, Confidence::High);
        assert!(approx(bundle.prediction.probability, 0.90));
    }

    #[test]
    fn test_unknown_degree_example() {
        let bundle = make_engine().predict(&make_profile("Unknown Field", &[], 0));

        assert_eq!(bundle.prediction.career_role, "Software Engineer");
        assert!(bundle.skill_gap.matching_skills.is_empty());
        let missing: Vec<&str> = bundle
            .skill_gap
            .missing_skills
            .iter()
            .map(|m| m.skill.as_str())
            .collect();
        assert_eq!(missing, vec!["JavaScript", "Python", "Git"]);
        assert_eq!(bundle.skill_gap.missing_skills[2].importance, Importance::Critical);
        assert_eq!(bundle.skill_gap.overall_match, 0);
        assert_eq!(bundle.prediction.confidence, Confidence::Medium);
        let alternates: Vec<&str> = bundle
            .prediction
            .alternative_careers
            .iter()
            .map(|a| a.role.as_str())
            .collect();
        assert_eq!(alternates, vec!["Data Analyst", "Business Analyst"]);
    }

    #[test]
    fn test_role_without_skill_row_uses_default_required_skills() {
        // Engineering → Systems Engineer, which has no required-skill row.
        let bundle = make_engine().predict(&make_profile("Engineering", &["Git"], 1));

        assert_eq!(bundle.prediction.career_role, "Systems Engineer");
        assert_eq!(bundle.skill_gap.matching_skills, vec!["Git"]);
        let missing: Vec<&str> = bundle
            .skill_gap
            .missing_skills
            .iter()
            .map(|m| m.skill.as_str())
            .collect();
        assert_eq!(missing, vec!["JavaScript", "Python"]);
        assert_eq!(bundle.skill_gap.overall_match, 33);
        assert_eq!(bundle.prediction.confidence, Confidence::Medium);
    }

    #[test]
    fn test_known_degree_predicts_first_listed_role() {
        let engine = make_engine();
        for (degree, roles) in &engine.tables().degree_roles {
            let bundle = engine.predict(&make_profile(degree, &[], 0));
            assert_eq!(&bundle.prediction.career_role, &roles[0]);
            assert_eq!(bundle.prediction.alternative_careers.len(), 3);
        }
    }

    #[test]
    fn test_matching_and_missing_partition_required_skills() {
        let engine = make_engine();
        let profile = make_profile("Business", &["Agile", "UX Design", "Cooking"], 5);
        let bundle = engine.predict(&profile);
        let required = engine.tables().required_skills("Product Manager");

        let mut union: Vec<String> = bundle.skill_gap.matching_skills.clone();
        union.extend(bundle.skill_gap.missing_skills.iter().map(|m| m.skill.clone()));
        union.sort();
        let mut expected = required.clone();
        expected.sort();
        assert_eq!(union, expected);
        assert!(!bundle.skill_gap.matching_skills.contains(&"Cooking".to_string()));
    }

    #[test]
    fn test_matching_follows_required_order() {
        let bundle = make_engine().predict(&make_profile(
            "Computer Science",
            &["SQL", "Agile", "JavaScript"],
            0,
        ));
        assert_eq!(
            bundle.skill_gap.matching_skills,
            vec!["JavaScript", "SQL", "Agile"]
        );
    }

    #[test]
    fn test_skill_match_is_case_sensitive() {
        let bundle = make_engine().predict(&make_profile("Computer Science", &["python"], 0));
        assert!(bundle.skill_gap.matching_skills.is_empty());
    }

    #[test]
    fn test_overall_match_bounds() {
        let engine = make_engine();
        let all = engine.tables().required_skills("Data Scientist");
        let all_refs: Vec<&str> = all.iter().map(String::as_str).collect();

        let none = engine.predict(&make_profile("Computer Science", &[], 0));
        assert_eq!(none.skill_gap.overall_match, 0);

        let mut tables = ReferenceTables::builtin();
        tables.degree_roles.insert(
            "Statistics".to_string(),
            vec!["Data Scientist".to_string()],
        );
        let engine = ScoringEngine::new(Arc::new(tables));
        let bundle = engine.predict(&make_profile("Statistics", &all_refs, 0));
        assert_eq!(bundle.skill_gap.overall_match, 100);
        assert!(bundle.skill_gap.missing_skills.is_empty());
        assert!(bundle.prediction.alternative_careers.is_empty());
    }

    #[test]
    fn test_confidence_threshold_matches_ceil_of_sixty_percent() {
        let engine = make_engine();
        // Software Engineer requires 7 skills; ceil(0.6 * 7) = 5.
        let four = engine.predict(&make_profile(
            "Computer Science",
            &["JavaScript", "Python", "Git", "Docker"],
            0,
        ));
        assert_eq!(four.prediction.confidence, Confidence::Medium);

        let five = engine.predict(&make_profile(
            "Computer Science",
            &["JavaScript", "Python", "Git", "Docker", "SQL"],
            0,
        ));
        assert_eq!(five.prediction.confidence, Confidence::High);
    }

    #[test]
    fn test_confidence_exact_sixty_percent_is_high() {
        // Product Manager requires 5 skills; 3 of 5 is exactly 60%.
        let bundle = make_engine().predict(&make_profile(
            "Business",
            &["Product Strategy", "Agile", "Analytics"],
            0,
        ));
        assert_eq!(bundle.prediction.confidence, Confidence::High);
        assert_eq!(bundle.skill_gap.overall_match, 60);
    }

    #[test]
    fn test_salary_range_is_linear_in_experience() {
        let engine = make_engine();
        for years in [0_u32, 1, 3, 10, 40] {
            let bundle = engine.predict(&make_profile("Business", &[], years));
            let salary = &bundle.prediction.salary_range;
            let y = u64::from(years);
            assert_eq!(salary.average, 80_000 + 7_500 * y);
            assert_eq!(salary.min, 60_000 + 5_000 * y);
            assert_eq!(salary.max, 100_000 + 10_000 * y);
            assert_eq!(salary.currency, "USD");
        }
    }

    #[test]
    fn test_alternative_career_scores() {
        let bundle = make_engine().predict(&make_profile("Business", &[], 0));
        let alts = &bundle.prediction.alternative_careers;
        assert_eq!(alts.len(), 3);
        assert_eq!(alts[0].role, "Business Analyst");
        assert!(approx(alts[0].probability, 0.65));
        assert!(approx(alts[1].probability, 0.55));
        assert!(approx(alts[2].probability, 0.45));
        assert_eq!(
            alts.iter().map(|a| a.match_score).collect::<Vec<_>>(),
            vec![75, 65, 55]
        );
    }

    #[test]
    fn test_missing_skill_annotations() {
        let bundle = make_engine().predict(&make_profile("Computer Science", &[], 0));
        let missing = &bundle.skill_gap.missing_skills;
        assert_eq!(missing.len(), 7);
        assert_eq!(missing[0].importance, Importance::Critical);
        assert_eq!(missing[2].importance, Importance::Critical);
        assert_eq!(missing[3].importance, Importance::Important);
        assert_eq!(
            missing.iter().map(|m| m.impact_on_success).collect::<Vec<_>>(),
            vec![15, 13, 11, 9, 7, 5, 3]
        );
    }

    #[test]
    fn test_recommended_skills_capped_at_five() {
        let bundle = make_engine().predict(&make_profile("Computer Science", &[], 0));
        let recommended = &bundle.skill_gap.recommended_skills;
        assert_eq!(recommended.len(), 5);
        assert_eq!(recommended[0].skill, "JavaScript");
        assert_eq!(recommended[0].reason, "Essential for Software Engineer role");
        assert_eq!(
            recommended.iter().map(|r| r.priority).collect::<Vec<_>>(),
            vec![5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_insights_market_demand_threshold() {
        let engine = make_engine();
        let junior = engine.predict(&make_profile("Business", &[], 3));
        let senior = engine.predict(&make_profile("Business", &[], 4));
        assert_eq!(junior.insights.market_demand, MarketDemand::Medium);
        assert_eq!(senior.insights.market_demand, MarketDemand::High);
        assert_eq!(senior.insights.growth_potential, GrowthPotential::High);
        assert_eq!(senior.insights.industry_trends.len(), 3);
    }

    #[test]
    fn test_insights_focus_lists_first_three_missing() {
        let bundle = make_engine().predict(&make_profile("Computer Science", &["Python"], 0));
        assert_eq!(
            bundle.insights.recommendations[0],
            "Focus on acquiring JavaScript, Git, Docker"
        );
        assert_eq!(bundle.insights.recommendations.len(), 3);
    }

    #[test]
    fn test_probability_is_clamped_to_one() {
        let mut tables = ReferenceTables::builtin();
        let skills: Vec<String> = (0..12).map(|i| format!("Skill{i}")).collect();
        tables
            .degree_roles
            .insert("Polymath".to_string(), vec!["Generalist".to_string()]);
        tables
            .role_skills
            .insert("Generalist".to_string(), skills.clone());
        let engine = ScoringEngine::new(Arc::new(tables));

        let refs: Vec<&str> = skills.iter().map(String::as_str).collect();
        let bundle = engine.predict(&make_profile("Polymath", &refs, 0));
        // Unclamped this would be 0.75 + 0.36 = 1.11.
        assert_eq!(bundle.prediction.probability, 1.0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let engine = make_engine();
        let profile = make_profile("Data Science", &["Python", "SQL"], 6);
        let first = serde_json::to_string(&engine.predict(&profile)).unwrap();
        let second = serde_json::to_string(&engine.predict(&profile)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_input_rejected_before_scoring() {
        let err = Profile::from_value(&json!({"degree": "Business", "skills": 3, "experience": 1}))
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput(_)));
    }

    #[test]
    fn test_bundle_wire_shape() {
        let profile = Profile::from_value(&json!({
            "degree": "Computer Science",
            "skills": ["Git"],
            "experience": 1
        }))
        .unwrap();
        let bundle = make_engine().predict(&profile);
        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value["prediction"]["careerRole"], json!("Software Engineer"));
        assert_eq!(value["prediction"]["salaryRange"]["currency"], json!("USD"));
        assert_eq!(value["skillGap"]["overallMatch"], json!(14));
        assert_eq!(
            value["skillGap"]["missingSkills"][0]["impactOnSuccess"],
            json!(15)
        );
        assert_eq!(value["insights"]["marketDemand"], json!("Medium"));
    }

    #[test]
    fn test_compare_salary_difference() {
        let comparison = compare_careers(
            &CareerDescriptor {
                role: Some("X".to_string()),
                avg_salary: Some(50_000.0),
                growth_rate: Some("10%".to_string()),
                skills: None,
            },
            &CareerDescriptor {
                role: Some("Y".to_string()),
                avg_salary: Some(70_000.0),
                growth_rate: Some("5%".to_string()),
                skills: None,
            },
        );
        assert_eq!(comparison.insights.salary_difference, 20_000.0);
        // "5%" > "10%" lexicographically.
        assert_eq!(comparison.insights.better_growth, "Y");
    }

    #[test]
    fn test_compare_defaults() {
        let comparison = make_engine().compare(&CareerDescriptor::default(), &CareerDescriptor::default());
        assert_eq!(comparison.career1.role, "Software Engineer");
        assert_eq!(comparison.career2.role, "Data Scientist");
        assert_eq!(comparison.insights.salary_difference, 15_000.0);
        assert_eq!(comparison.insights.better_growth, "Data Scientist");
        assert_eq!(
            comparison.career1.required_skills,
            vec!["JavaScript", "React", "Node.js"]
        );
    }

    #[test]
    fn test_compare_equal_growth_prefers_first() {
        let descriptor = CareerDescriptor {
            growth_rate: Some("12%".to_string()),
            ..Default::default()
        };
        let comparison = compare_careers(&descriptor, &descriptor);
        assert_eq!(comparison.insights.better_growth, "Software Engineer");
    }
}
