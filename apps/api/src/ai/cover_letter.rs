//! Cover letter writing. Free-text mode; failures surface an error since a
//! fabricated letter is worse than none.

use crate::ai::prompts::{COVER_LETTER_SYSTEM, COVER_LETTER_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::{GenClient, OutputMode};
use crate::models::resume::{ContactInfo, Section};

pub struct CoverLetterInput<'a> {
    pub sections: &'a [Section],
    pub job_description: &'a str,
    pub contact: Option<&'a ContactInfo>,
    pub company_name: Option<&'a str>,
    pub role_name: Option<&'a str>,
}

/// Writes a cover letter from resume sections and a job description.
pub async fn write_cover_letter(
    input: CoverLetterInput<'_>,
    llm: &GenClient,
) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(input.sections)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize sections: {e}")))?;

    let candidate_line = match input.contact {
        Some(c) => format!("Candidate: {}", c.full_name),
        None => "Candidate name: use a first-person voice without a signature name.".to_string(),
    };
    let company_line = match input.company_name {
        Some(name) => format!("Company: {name}"),
        None => "Company: infer from the job description if stated.".to_string(),
    };
    let role_line = match input.role_name {
        Some(name) => format!("Role: {name}"),
        None => "Role: infer from the job description.".to_string(),
    };

    let prompt = COVER_LETTER_TEMPLATE
        .replace("{candidate_line}", &candidate_line)
        .replace("{company_line}", &company_line)
        .replace("{role_line}", &role_line)
        .replace("{resume_json}", &resume_json)
        .replace("{jd_text}", input.job_description);

    let completion = llm
        .generate(&prompt, COVER_LETTER_SYSTEM, OutputMode::Prose)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    Ok(completion.text.trim().to_string())
}
