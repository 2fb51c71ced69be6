//! Axum route handlers for the AI endpoints.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ai::ats::score_sections;
use crate::ai::cover_letter::{write_cover_letter, CoverLetterInput};
use crate::ai::enhance::{enhance_batch, enhance_text, EnhanceItem, Enhanced, EnhancedItem};
use crate::ai::generate::generate_resume;
use crate::ai::jd_analysis::{analyze_jd, validate_jd};
use crate::ai::parse::{extract_pdf_text, structure_resume_text};
use crate::errors::AppError;
use crate::models::resume::{
    AtsScore, ContactInfo, GeneratedResume, JdAnalysis, Resume, Section,
};
use crate::render::suggest_template;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Generic `{"data": ...}` envelope used by the AI endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJdRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJdResponse {
    pub data: JdAnalysis,
    /// Template auto-selected from the detected tone and industry.
    pub suggested_template: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    /// Either a full resume object or a bare section list is accepted.
    #[serde(default)]
    pub resume: Option<Resume>,
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub resume_sections: Vec<Section>,
    pub job_description: String,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub text: String,
    pub section_type: String,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceBatchRequest {
    pub items: Vec<EnhanceItem>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceBatchResponse {
    pub items: Vec<EnhancedItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDraftResponse {
    pub data: GeneratedResume,
    /// The draft converted to ordered sections, ready to save on a resume.
    pub sections: Vec<Section>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/analyze-jd
///
/// Analyzes a job description (minimum 50 chars) and suggests a template.
/// LLM failures surface an error: there is no safe default analysis.
pub async fn handle_analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJdRequest>,
) -> Result<Json<AnalyzeJdResponse>, AppError> {
    validate_jd(&request.job_description)?;

    let analysis = analyze_jd(&request.job_description, &state.llm).await?;
    let suggested_template = suggest_template(&analysis).to_string();

    Ok(Json(AnalyzeJdResponse {
        data: analysis,
        suggested_template,
    }))
}

/// POST /api/v1/ai/ats-score
///
/// Scores sections for ATS compatibility. Always returns 200: AI failure
/// degrades to the fixed default score object.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<AtsScoreRequest>,
) -> Result<Json<DataResponse<AtsScore>>, AppError> {
    let sections = match (request.sections, request.resume) {
        (Some(sections), _) => sections,
        (None, Some(resume)) => resume.sections,
        (None, None) => {
            return Err(AppError::Validation(
                "Provide either 'sections' or a 'resume' to score".to_string(),
            ))
        }
    };

    let score = score_sections(&sections, request.job_description.as_deref(), &state.llm).await;

    Ok(Json(DataResponse { data: score }))
}

/// POST /api/v1/ai/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<DataResponse<String>>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    let letter = write_cover_letter(
        CoverLetterInput {
            sections: &request.resume_sections,
            job_description: &request.job_description,
            contact: request.contact_info.as_ref(),
            company_name: request.company_name.as_deref(),
            role_name: request.role_name.as_deref(),
        },
        &state.llm,
    )
    .await?;

    Ok(Json(DataResponse { data: letter }))
}

/// POST /api/v1/ai/enhance
///
/// Enhances one piece of text. Never fails: AI failure returns the
/// capitalization fallback tagged `fallback: true`.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<Enhanced>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let result = enhance_text(
        &request.text,
        &request.section_type,
        request.action.as_deref(),
        &state.llm,
    )
    .await;

    Ok(Json(result))
}

/// POST /api/v1/ai/enhance-batch
///
/// Fans out one enhancement per item concurrently and joins all results.
pub async fn handle_enhance_batch(
    State(state): State<AppState>,
    Json(request): Json<EnhanceBatchRequest>,
) -> Result<Json<EnhanceBatchResponse>, AppError> {
    if request.items.is_empty() {
        return Err(AppError::Validation("items cannot be empty".to_string()));
    }

    let items = enhance_batch(request.items, &state.llm).await;
    Ok(Json(EnhanceBatchResponse { items }))
}

/// POST /api/v1/ai/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedDraftResponse>, AppError> {
    let draft = generate_resume(
        &request.prompt,
        request.job_description.as_deref(),
        &state.llm,
    )
    .await?;

    let sections = draft.clone().into_sections(request.contact_info);

    Ok(Json(GeneratedDraftResponse {
        data: draft,
        sections,
    }))
}

/// POST /api/v1/ai/parse
///
/// Accepts a multipart PDF upload, extracts its text layer, then structures
/// it into a resume draft via the LLM.
pub async fn handle_parse(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GeneratedDraftResponse>, AppError> {
    let mut pdf_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart upload: {e}")))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume.pdf").to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        pdf_bytes = Some(data.to_vec());
        break;
    }

    let pdf_bytes = pdf_bytes
        .ok_or_else(|| AppError::Validation("No file field in upload".to_string()))?;

    // pdf-extract is CPU-bound and synchronous; keep it off the runtime.
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&pdf_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;

    let draft = structure_resume_text(&text, &state.llm).await?;
    let sections = draft.clone().into_sections(None);

    Ok(Json(GeneratedDraftResponse {
        data: draft,
        sections,
    }))
}
