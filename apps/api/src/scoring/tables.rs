//! Reference tables for the heuristic engine: degree → roles, role → required skills.
//!
//! Loaded once at startup and shared read-only as `Arc<ReferenceTables>`.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Primary role when the degree is not in the table.
pub const DEFAULT_ROLE: &str = "Software Engineer";
/// Alternates when the degree is not in the table.
pub const DEFAULT_ALTERNATES: &[&str] = &["Data Analyst", "Business Analyst"];
/// Required skills when the primary role is not in the table.
pub const DEFAULT_REQUIRED_SKILLS: &[&str] = &["JavaScript", "Python", "Git"];

/// Number of alternates taken after the primary role.
pub const MAX_ALTERNATES: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Ordered role list per degree; first entry is the primary role.
    pub degree_roles: HashMap<String, Vec<String>>,
    /// Ordered required skills per role; order drives importance and priority.
    pub role_skills: HashMap<String, Vec<String>>,
}

impl ReferenceTables {
    pub fn builtin() -> Self {
        let degree_roles = [
            (
                "Computer Science",
                &["Software Engineer", "Data Scientist", "ML Engineer", "DevOps Engineer"][..],
            ),
            (
                "Business",
                &["Product Manager", "Business Analyst", "Consultant", "Marketing Manager"][..],
            ),
            (
                "Data Science",
                &["Data Analyst", "Data Engineer", "ML Engineer", "Research Scientist"][..],
            ),
            (
                "Engineering",
                &["Systems Engineer", "Quality Engineer", "Technical Lead", "Solutions Architect"][..],
            ),
        ];

        let role_skills = [
            (
                "Software Engineer",
                &["JavaScript", "Python", "Git", "Docker", "SQL", "REST APIs", "Agile"][..],
            ),
            (
                "Data Scientist",
                &[
                    "Python",
                    "Machine Learning",
                    "Statistics",
                    "SQL",
                    "Data Visualization",
                    "TensorFlow",
                ][..],
            ),
            (
                "Product Manager",
                &[
                    "Product Strategy",
                    "Agile",
                    "Stakeholder Management",
                    "Analytics",
                    "UX Design",
                ][..],
            ),
        ];

        Self {
            degree_roles: to_map(&degree_roles),
            role_skills: to_map(&role_skills),
        }
    }

    /// Loads tables from a JSON file shaped like `{"degree_roles": {...}, "role_skills": {...}}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scoring tables from {}", path.display()))?;
        let tables: ReferenceTables = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid scoring tables JSON in {}", path.display()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Rejects rows the engine cannot score: empty role lists or empty skill lists.
    pub fn validate(&self) -> Result<()> {
        for (degree, roles) in &self.degree_roles {
            if roles.is_empty() {
                bail!("Degree '{degree}' has no roles");
            }
        }
        for (role, skills) in &self.role_skills {
            if skills.is_empty() {
                bail!("Role '{role}' has no required skills");
            }
        }
        Ok(())
    }

    pub fn knows_degree(&self, degree: &str) -> bool {
        self.degree_roles
            .get(degree)
            .map_or(false, |roles| !roles.is_empty())
    }

    /// Returns `(primary, alternates)` for a degree, falling back to the defaults.
    pub fn roles_for(&self, degree: &str) -> (String, Vec<String>) {
        match self.degree_roles.get(degree).filter(|r| !r.is_empty()) {
            Some(roles) => (
                roles[0].clone(),
                roles.iter().skip(1).take(MAX_ALTERNATES).cloned().collect(),
            ),
            None => (
                DEFAULT_ROLE.to_string(),
                DEFAULT_ALTERNATES.iter().map(|s| s.to_string()).collect(),
            ),
        }
    }

    /// Required skills for a role, falling back to the defaults.
    pub fn required_skills(&self, role: &str) -> Vec<String> {
        match self.role_skills.get(role).filter(|s| !s.is_empty()) {
            Some(skills) => skills.clone(),
            None => default_required_skills(),
        }
    }

    /// Sorted union of every skill the tables know about.
    pub fn skill_vocabulary(&self) -> Vec<String> {
        let mut set: BTreeSet<&str> = self
            .role_skills
            .values()
            .flat_map(|skills| skills.iter().map(String::as_str))
            .collect();
        set.extend(DEFAULT_REQUIRED_SKILLS.iter().copied());
        set.into_iter().map(String::from).collect()
    }
}

pub fn default_required_skills() -> Vec<String> {
    DEFAULT_REQUIRED_SKILLS.iter().map(|s| s.to_string()).collect()
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_map(rows: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    rows.iter()
        .map(|(key, values)| {
            (
                key.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}
