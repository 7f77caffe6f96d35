//! Axum route handler for resume uploads.

use axum::{extract::Multipart, Json};
use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::parser::ParsedResume;

/// Multipart field carrying the PDF.
const RESUME_FIELD: &str = "resume";

/// Upload cap applied to the parse route.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/v1/resume/parse
///
/// Unreadable PDFs still answer 200 with a placeholder and a warning so the
/// client can fall back to manual entry.
pub async fn handle_parse_resume(mut multipart: Multipart) -> Result<Json<ParsedResume>, AppError> {
    let Some(pdf) = read_resume_field(&mut multipart).await? else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };
    info!("Parsing uploaded resume ({} bytes)", pdf.len());

    // pdf-extract can panic on malformed input; a join error is treated as unreadable.
    let extracted = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&pdf).map_err(|e| e.to_string())
    })
    .await
    .unwrap_or_else(|e| Err(format!("extraction task aborted: {e}")));

    let parsed = match extracted {
        Ok(text) => ParsedResume::from_text(&text),
        Err(e) => {
            warn!("Failed to extract text from uploaded resume: {e}");
            ParsedResume::unreadable()
        }
    };
    Ok(Json(parsed))
}

/// Returns the bytes of the `resume` field, skipping any other parts.
async fn read_resume_field(multipart: &mut Multipart) -> Result<Option<Bytes>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.is_empty() {
            return Ok(None);
        }
        return Ok(Some(data));
    }
    Ok(None)
}
