//! Uploaded-resume parsing: PDF text extraction followed by LLM structuring.

use crate::ai::json_recovery::recover;
use crate::ai::prompts::{PARSE_RESUME_SYSTEM, PARSE_RESUME_TEMPLATE};
use crate::errors::AppError;
use crate::llm_client::{GenClient, OutputMode};
use crate::models::resume::GeneratedResume;

/// Extraction shorter than this is treated as a failed upload (scanned
/// image PDFs with no text layer, corrupt files).
const MIN_EXTRACTED_CHARS: usize = 30;

/// Extracts the text layer from an uploaded PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    if text.trim().chars().count() < MIN_EXTRACTED_CHARS {
        return Err(AppError::UnprocessableEntity(
            "The PDF contains no extractable text. Scanned documents are not supported."
                .to_string(),
        ));
    }
    Ok(text)
}

/// Structures extracted resume text into a draft via the LLM.
pub async fn structure_resume_text(
    text: &str,
    llm: &GenClient,
) -> Result<GeneratedResume, AppError> {
    let prompt = PARSE_RESUME_TEMPLATE.replace("{resume_text}", text);

    let completion = llm
        .generate(&prompt, PARSE_RESUME_SYSTEM, OutputMode::Json)
        .await
        .map_err(|e| AppError::Llm(format!("Resume structuring failed: {e}")))?;

    recover::<GeneratedResume>(&completion.text)
        .map_err(|e| AppError::Llm(format!("Resume structuring returned unusable output: {e}")))
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

    #[test]
    fn test_garbage_bytes_are_unprocessable() {
        let result = extract_pdf_text(b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn test_structuring_recovers_draft_from_noisy_output() {
        let llm = GenClient::with_backend(Arc::new(FixedBackend(
            "Here is the structured resume:\n{\"title\": \"Imported Resume\", \
             \"summary\": null, \"skills\": [\"SQL\"], \"experience\": [], \
             \"projects\": [], \"education\": [], \"certifications\": []}",
        )));
        let draft = structure_resume_text("JOHN DOE\nSkills: SQL", &llm)
            .await
            .unwrap();
        assert_eq!(draft.title.as_deref(), Some("Imported Resume"));
        assert_eq!(draft.skills, vec!["SQL".to_string()]);
    }
}
