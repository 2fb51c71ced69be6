//! JD analysis: extracts role, seniority, skills, ATS keywords, industry,
//! and tone from a raw job description.

use crate::ai::json_recovery::recover;
use crate::ai::prompts::{ANALYZE_JD_SYSTEM, ANALYZE_JD_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::{GenClient, OutputMode};
use crate::models::resume::JdAnalysis;

/// Anything shorter than this is not a job description worth analyzing.
pub const MIN_JD_CHARS: usize = 50;

/// Validates the job description length. Shared by every endpoint that
/// accepts a JD.
pub fn validate_jd(jd_text: &str) -> Result<(), AppError> {
    if jd_text.trim().chars().count() < MIN_JD_CHARS {
        return Err(AppError::Validation(format!(
            "jobDescription must be at least {MIN_JD_CHARS} characters"
        )));
    }
    Ok(())
}

/// Analyzes a job description via the LLM. Failures surface an error: there
/// is no safe default analysis to fabricate.
pub async fn analyze_jd(jd_text: &str, llm: &GenClient) -> Result<JdAnalysis, AppError> {
    let prompt = ANALYZE_JD_TEMPLATE.replace("{jd_text}", jd_text);

    let completion = llm
        .generate(&prompt, ANALYZE_JD_SYSTEM, OutputMode::Json)
        .await
        .map_err(|e| AppError::Llm(format!("JD analysis failed: {e}")))?;

    recover::<JdAnalysis>(&completion.text)
        .map_err(|e| AppError::Llm(format!("JD analysis returned unusable output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::JdTone;

    #[test]
    fn test_validate_jd_rejects_short_text() {
        assert!(validate_jd("too short").is_err());
        assert!(validate_jd("   ").is_err());
    }

    #[test]
    fn test_validate_jd_accepts_realistic_text() {
        let jd = "We are hiring a senior Rust engineer to build and operate \
                  our payments platform on AWS.";
        assert!(validate_jd(jd).is_ok());
    }

    #[test]
    fn test_jd_analysis_deserializes_prompt_schema() {
        // The example object embedded in the prompt must round-trip into the type.
        let json = r#"{
            "role": "Backend Engineer",
            "seniority": "senior",
            "requiredSkills": ["Rust", "PostgreSQL"],
            "preferredSkills": ["Kubernetes"],
            "atsKeywords": ["distributed systems", "REST APIs"],
            "industry": "fintech",
            "tone": "corporate"
        }"#;
        let analysis: JdAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.role, "Backend Engineer");
        assert_eq!(analysis.tone, JdTone::Corporate);
        assert_eq!(analysis.required_skills.len(), 2);
        assert_eq!(analysis.industry.as_deref(), Some("fintech"));
    }
}
