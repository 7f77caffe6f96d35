//! Resume text scraping: email and known-skill extraction over PDF text.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Skills recognised in uploaded resumes. Order is the output order.
pub const RESUME_SKILLS: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "SQL",
    "Git",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "React",
    "Angular",
    "Vue.js",
    "Node.js",
    "Django",
    "Flask",
    "Machine Learning",
    "Deep Learning",
    "Data Analysis",
    "Statistics",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "PostgreSQL",
    "MongoDB",
    "Redis",
    "Elasticsearch",
    "CI/CD",
    "DevOps",
    "Linux",
    "Networking",
    "Agile",
    "Scrum",
    "Project Management",
    "Communication",
    "Problem Solving",
    "Teamwork",
    "Leadership",
    "AI/ML",
];

const PREVIEW_CHARS: usize = 1000;

pub const UNREADABLE_PLACEHOLDER: &str =
    "Could not parse text from PDF. Please enter details manually.";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub email: String,
    pub skills: Vec<String>,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ParsedResume {
    pub fn from_text(text: &str) -> Self {
        Self {
            email: extract_email(text).unwrap_or_default(),
            skills: extract_skills(text),
            raw_text: preview(text),
            warning: None,
        }
    }

    /// Returned when the PDF could not be read, so the form stays usable.
    pub fn unreadable() -> Self {
        Self {
            email: String::new(),
            skills: Vec::new(),
            raw_text: UNREADABLE_PLACEHOLDER.to_string(),
            warning: Some("Resume parsing failed, but file was uploaded.".to_string()),
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
    })
}

/// One case-insensitive matcher per skill. Skills such as `C++` or `CI/CD`
/// end in non-word characters, so `\b` cannot anchor them; the pattern
/// requires a non-alphanumeric neighbour (or text boundary) instead.
fn skill_matchers() -> &'static [(&'static str, Regex)] {
    static MATCHERS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        RESUME_SKILLS
            .iter()
            .map(|skill| {
                let pattern = format!(r"(?i)(?:^|[^A-Za-z0-9_]){}(?:$|[^A-Za-z0-9_])", regex::escape(skill));
                (*skill, Regex::new(&pattern).expect("escaped skill pattern"))
            })
            .collect()
    })
}

pub fn extract_email(text: &str) -> Option<String> {
    email_regex().find(text).map(|m| m.as_str().to_string())
}

pub fn extract_skills(text: &str) -> Vec<String> {
    skill_matchers()
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(skill, _)| skill.to_string())
        .collect()
}

/// First 1000 characters followed by `...`.
pub fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
