// PDF report for a stored analysis: content blocks, Helvetica layout, printpdf drawing.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::analysis::models::AnalysisView;

pub mod content;
pub mod layout;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Renders the full career analysis report as PDF bytes.
pub fn render_report(view: &AnalysisView, generated_on: NaiveDate) -> Result<Vec<u8>, ReportError> {
    let blocks = content::build_blocks(view, generated_on);
    let title = format!("Career Analysis {}", view.id);
    let (bytes, pages) = pdf::render_blocks(&title, &blocks)?;
    debug!("Rendered report for analysis {} ({pages} pages, {} bytes)", view.id, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::scoring::engine::ScoringEngine;
    use crate::scoring::models::Profile;
    use crate::scoring::tables::ReferenceTables;
    use uuid::Uuid;

    #[test]
    fn test_render_report_end_to_end() {
        let input = Profile {
            degree: "Business".to_string(),
            skills: vec!["Agile".to_string(), "Analytics".to_string()],
            experience: 4,
            interests: vec!["Fintech".to_string()],
            education: Some("Business".to_string()),
            certifications: vec![],
        };
        let bundle = ScoringEngine::new(Arc::new(ReferenceTables::builtin())).predict(&input);
        let view = AnalysisView {
            id: Uuid::new_v4(),
            input,
            bundle,
        };

        let bytes = render_report(&view, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }
}
