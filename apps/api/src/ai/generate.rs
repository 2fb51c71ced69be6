//! Resume generation: turns a candidate's free-form background description
//! into a structured draft. Failures surface an error, no default content
//! can be fabricated here.

use crate::ai::json_recovery::recover;
use crate::ai::prompts::{GENERATE_SYSTEM, GENERATE_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::{GenClient, OutputMode};
use crate::models::resume::GeneratedResume;

/// Generates a structured resume draft from the candidate's description,
/// optionally tailored to a target job description.
pub async fn generate_resume(
    background: &str,
    job_description: Option<&str>,
    llm: &GenClient,
) -> Result<GeneratedResume, AppError> {
    if background.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }

    let jd_block = match job_description {
        Some(jd) if !jd.trim().is_empty() => format!("TARGET JOB DESCRIPTION:\n{jd}"),
        _ => "No target job description was provided.".to_string(),
    };

    let prompt = GENERATE_TEMPLATE
        .replace("{background}", background)
        .replace("{jd_block}", &jd_block);

    let completion = llm
        .generate(&prompt, GENERATE_SYSTEM, OutputMode::Json)
        .await
        .map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))?;

    recover::<GeneratedResume>(&completion.text)
        .map_err(|e| AppError::Llm(format!("Resume generation returned unusable output: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{CompletionBackend, LlmError};

    struct FixedBackend(&'static str);

    #[async_trait]
    impl CompletionBackend for FixedBackend {
        async fn complete(
            &self,
            _model: &str,
            _system: &str,
            _prompt: &str,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_empty_background_is_a_validation_error() {
        let llm = GenClient::with_backend(Arc::new(FixedBackend("{}")));
        let result = generate_resume("   ", None, &llm).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_fenced_draft_is_recovered() {
        let llm = GenClient::with_backend(Arc::new(FixedBackend(
            "```json\n{\"title\": \"Engineer\", \"summary\": \"Builds systems.\", \
             \"skills\": [\"Rust\"], \"experience\": [], \"projects\": [], \
             \"education\": [], \"certifications\": []}\n```",
        )));
        let draft = generate_resume("ten years of backend work", None, &llm)
            .await
            .unwrap();
        assert_eq!(draft.title.as_deref(), Some("Engineer"));
        assert_eq!(draft.skills, vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_prose_only_response_surfaces_llm_error() {
        let llm = GenClient::with_backend(Arc::new(FixedBackend(
            "I'd be happy to help you write a resume!",
        )));
        let result = generate_resume("ten years of backend work", None, &llm).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
