//! Resume record store: persistence and retrieval of resume documents.
//!
//! The table keeps its own external column names (`user_ref`, `template`,
//! `target_jd`, `ats_json`); this module owns the bidirectional mapping to
//! the in-memory model and supplies safe defaults for absent fields.
//!
//! Expected schema:
//! ```sql
//! CREATE TABLE resumes (
//!     id         UUID PRIMARY KEY,
//!     user_ref   TEXT,
//!     title      TEXT,
//!     template   TEXT,
//!     sections   JSONB,
//!     target_jd  TEXT,
//!     ats_json   JSONB,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

pub mod handlers;

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    normalize_orders, AtsScore, ContactInfo, Resume, Section, ANONYMOUS_OWNER,
    DEFAULT_TEMPLATE_ID,
};

/// Raw persisted shape. Every translated column is nullable: rows written by
/// earlier versions of the product may omit any of them.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_ref: Option<String>,
    pub title: Option<String>,
    pub template: Option<String>,
    pub sections: Option<Value>,
    pub target_jd: Option<String>,
    pub ats_json: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for Resume {
    fn from(row: ResumeRow) -> Self {
        let sections: Vec<Section> = row
            .sections
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let ats_score: Option<AtsScore> =
            row.ats_json.and_then(|v| serde_json::from_value(v).ok());

        Resume {
            id: row.id,
            owner_id: row.user_ref.unwrap_or_else(|| ANONYMOUS_OWNER.to_string()),
            title: row.title.unwrap_or_else(|| "Untitled Resume".to_string()),
            template_id: row
                .template
                .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string()),
            sections,
            job_description: row.target_jd,
            ats_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Inputs for creating a resume.
pub struct CreateResumeParams {
    pub owner_id: String,
    pub title: String,
    pub template_id: Option<String>,
    pub contact_info: Option<ContactInfo>,
    pub job_description: Option<String>,
}

/// Fields a PATCH may touch. `None` means "leave unchanged".
#[derive(Debug, Default)]
pub struct ResumePatch {
    pub title: Option<String>,
    pub template_id: Option<String>,
    pub sections: Option<Vec<Section>>,
    pub job_description: Option<String>,
    pub ats_score: Option<AtsScore>,
}

/// Creates a new resume. A supplied contact becomes the section at order 0.
pub async fn create_resume(
    pool: &PgPool,
    params: CreateResumeParams,
) -> Result<Resume, AppError> {
    let resume = Resume::new(
        params.owner_id,
        params.title,
        params
            .template_id
            .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string()),
        params.contact_info,
        params.job_description,
    );

    let sections_json = serde_json::to_value(&resume.sections)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize sections: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO resumes (id, user_ref, title, template, sections, target_jd, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(resume.id)
    .bind(&resume.owner_id)
    .bind(&resume.title)
    .bind(&resume.template_id)
    .bind(&sections_json)
    .bind(&resume.job_description)
    .bind(resume.created_at)
    .bind(resume.updated_at)
    .execute(pool)
    .await?;

    info!("Created resume {} for owner {}", resume.id, resume.owner_id);
    Ok(resume)
}

/// Fetches one resume by id.
pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Resume, AppError> {
    let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(row.into())
}

/// Lists an owner's resumes, newest first.
pub async fn list_resumes(pool: &PgPool, owner_id: &str) -> Result<Vec<Resume>, AppError> {
    let rows = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_ref = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Resume::from).collect())
}

/// Applies a partial update. Only provided fields are written; the update
/// timestamp always refreshes. Section orders are normalized before write.
pub async fn update_resume(
    pool: &PgPool,
    id: Uuid,
    mut patch: ResumePatch,
) -> Result<Resume, AppError> {
    let sections_json = match patch.sections.as_mut() {
        Some(sections) => {
            normalize_orders(sections);
            Some(serde_json::to_value(&sections).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize sections: {e}"))
            })?)
        }
        None => None,
    };

    let ats_json = match &patch.ats_score {
        Some(score) => Some(serde_json::to_value(score).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to serialize ATS score: {e}"))
        })?),
        None => None,
    };

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET title      = COALESCE($2, title),
            template   = COALESCE($3, template),
            sections   = COALESCE($4, sections),
            target_jd  = COALESCE($5, target_jd),
            ats_json   = COALESCE($6, ats_json),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&patch.title)
    .bind(&patch.template_id)
    .bind(&sections_json)
    .bind(&patch.job_description)
    .bind(&ats_json)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(row.into())
}

/// Deletes a resume. Idempotent: deleting a missing record is not an error.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() > 0 {
        info!("Deleted resume {id}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SectionContent;
    use serde_json::json;

    fn bare_row() -> ResumeRow {
        ResumeRow {
            id: Uuid::new_v4(),
            user_ref: None,
            title: None,
            template: None,
            sections: None,
            target_jd: None,
            ats_json: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_with_absent_fields_maps_to_safe_defaults() {
        let resume: Resume = bare_row().into();
        assert_eq!(resume.owner_id, ANONYMOUS_OWNER);
        assert_eq!(resume.template_id, DEFAULT_TEMPLATE_ID);
        assert_eq!(resume.title, "Untitled Resume");
        assert!(resume.sections.is_empty());
        assert!(resume.ats_score.is_none());
        assert!(resume.job_description.is_none());
    }

    #[test]
    fn test_row_sections_round_trip_through_jsonb_value() {
        let sections = vec![Section {
            order: 0,
            content: SectionContent::Skills {
                items: vec!["Rust".to_string()],
            },
        }];
        let mut row = bare_row();
        row.sections = Some(serde_json::to_value(&sections).unwrap());

        let resume: Resume = row.into();
        assert_eq!(resume.sections, sections);
    }

    #[test]
    fn test_row_with_corrupt_sections_json_defaults_to_empty() {
        let mut row = bare_row();
        row.sections = Some(json!({"not": "a section list"}));

        let resume: Resume = row.into();
        assert!(resume.sections.is_empty());
    }

    #[test]
    fn test_row_ats_json_translates_to_ats_score() {
        let mut row = bare_row();
        row.ats_json = Some(serde_json::to_value(AtsScore::fallback_default()).unwrap());

        let resume: Resume = row.into();
        assert_eq!(resume.ats_score.unwrap().overall, 70);
    }

    #[test]
    fn test_row_target_jd_translates_to_job_description() {
        let mut row = bare_row();
        row.target_jd = Some("We need a Rust engineer.".to_string());

        let resume: Resume = row.into();
        assert_eq!(
            resume.job_description.as_deref(),
            Some("We need a Rust engineer.")
        );
    }
}
