//! Axum route handlers for resume CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{AtsScore, ContactInfo, Resume, Section, ANONYMOUS_OWNER};
use crate::state::AppState;
use crate::store::{
    create_resume, delete_resume, get_resume, list_resumes, update_resume, CreateResumeParams,
    ResumePatch,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub owner_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub ats_score: Option<AtsScore>,
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let resume = create_resume(
        &state.db,
        CreateResumeParams {
            owner_id: request
                .owner_id
                .unwrap_or_else(|| ANONYMOUS_OWNER.to_string()),
            title: request.title.unwrap_or_else(|| "Untitled Resume".to_string()),
            template_id: request.template_id,
            contact_info: request.contact_info,
            job_description: request.job_description,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes?ownerId=...
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<Resume>>, AppError> {
    let resumes = list_resumes(&state.db, &params.owner_id).await?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let resume = get_resume(&state.db, id).await?;
    Ok(Json(resume))
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<Resume>, AppError> {
    let resume = update_resume(
        &state.db,
        id,
        ResumePatch {
            title: request.title,
            template_id: request.template_id,
            sections: request.sections,
            job_description: request.job_description,
            ats_score: request.ats_score,
        },
    )
    .await?;

    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/:id
///
/// Idempotent: a second delete of the same id also returns 204.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_resume(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
