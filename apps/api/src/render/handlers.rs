//! Axum route handlers for document export.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::docx::build_docx;
use crate::render::html::render_html;
use crate::render::pdf::html_to_pdf;
use crate::render::TEMPLATES;
use crate::state::AppState;
use crate::store::get_resume;

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub name: &'static str,
}

/// GET /api/v1/templates
///
/// Lists the template catalog for the client's template picker.
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        TEMPLATES
            .iter()
            .map(|t| TemplateSummary {
                id: t.id,
                name: t.name,
            })
            .collect(),
    )
}

/// GET /api/v1/export/:resume_id
///
/// Renders the print view through a headless browser and returns the PDF
/// as an attachment.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resume = get_resume(&state.db, resume_id).await?;
    let html = render_html(&resume);
    let filename = attachment_filename(&resume.title, "pdf");

    let chrome_path = state.config.chrome_path.clone();
    let pdf = tokio::task::spawn_blocking(move || html_to_pdf(&html, chrome_path.as_deref()))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF export task failed: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(pdf),
    ))
}

/// GET /api/v1/export-docx/:resume_id
///
/// Builds a .docx directly from section data and returns it as an attachment.
pub async fn handle_export_docx(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resume = get_resume(&state.db, resume_id).await?;
    let filename = attachment_filename(&resume.title, "docx");
    let bytes = build_docx(&resume)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(bytes),
    ))
}

/// Builds a safe attachment filename from the resume title.
fn attachment_filename(title: &str, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "resume" } else { stem };
    format!("{stem}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename_sanitizes_title() {
        assert_eq!(
            attachment_filename("Backend Engineer / 2026", "pdf"),
            "Backend_Engineer___2026.pdf"
        );
    }

    #[test]
    fn test_attachment_filename_empty_title_falls_back() {
        assert_eq!(attachment_filename("///", "docx"), "resume.docx");
    }
}
