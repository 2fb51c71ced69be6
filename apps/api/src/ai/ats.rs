//! ATS scoring. This endpoint must never block the user flow: any failure,
//! from the network up to unusable JSON, degrades to the fixed default score.

use tracing::warn;

use crate::ai::json_recovery::recover;
use crate::ai::prompts::{ATS_SCORE_SYSTEM, ATS_SCORE_TEMPLATE};
use crate::llm_client::{GenClient, OutputMode};
use crate::models::resume::{AtsScore, Section};

/// Scores the given sections against an optional job description.
/// Infallible by design: callers always get a usable `AtsScore`.
pub async fn score_sections(
    sections: &[Section],
    job_description: Option<&str>,
    llm: &GenClient,
) -> AtsScore {
    let prompt = match build_prompt(sections, job_description) {
        Ok(p) => p,
        Err(e) => {
            warn!("ATS prompt build failed, returning default score: {e}");
            return AtsScore::fallback_default();
        }
    };

    let completion = match llm.generate(&prompt, ATS_SCORE_SYSTEM, OutputMode::Json).await {
        Ok(c) => c,
        Err(e) => {
            warn!("ATS scoring LLM call failed, returning default score: {e}");
            return AtsScore::fallback_default();
        }
    };

    match recover::<AtsScore>(&completion.text) {
        Ok(score) => clamp(score),
        Err(e) => {
            warn!("ATS scoring produced unusable output, returning default score: {e}");
            AtsScore::fallback_default()
        }
    }
}

fn build_prompt(
    sections: &[Section],
    job_description: Option<&str>,
) -> Result<String, serde_json::Error> {
    let sections_json = serde_json::to_string_pretty(sections)?;
    let jd_block = match job_description {
        Some(jd) if !jd.trim().is_empty() => format!("TARGET JOB DESCRIPTION:\n{jd}"),
        _ => "No target job description was provided.".to_string(),
    };
    Ok(ATS_SCORE_TEMPLATE
        .replace("{sections_json}", &sections_json)
        .replace("{jd_block}", &jd_block))
}

/// Sub-scores are specified as 0-100; the model occasionally overshoots.
fn clamp(mut score: AtsScore) -> AtsScore {
    score.overall = score.overall.min(100);
    score.keyword_match = score.keyword_match.min(100);
    score.formatting = score.formatting.min(100);
    score.section_completeness = score.section_completeness.min(100);
    score.readability = score.readability.min(100);
    score
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{CompletionBackend, LlmError};
    use crate::models::resume::SectionContent;

    struct DeadBackend;

    #[async_trait]
    impl CompletionBackend for DeadBackend {
        async fn complete(
            &self,
            _model: &str,
            _system: &str,
            _prompt: &str,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

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

    fn summary_section() -> Section {
        Section {
            order: 0,
            content: SectionContent::Summary {
                text: "Engineer with ten years of backend experience.".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_ai_failure_degrades_to_default_score() {
        let llm = GenClient::with_backend(Arc::new(DeadBackend));
        let score = score_sections(&[summary_section()], None, &llm).await;
        assert_eq!(score, AtsScore::fallback_default());
        assert_eq!(score.overall, 70);
    }

    #[tokio::test]
    async fn test_unusable_json_degrades_to_default_score() {
        let llm = GenClient::with_backend(Arc::new(FixedBackend("I refuse to score this.")));
        let score = score_sections(&[summary_section()], None, &llm).await;
        assert_eq!(score, AtsScore::fallback_default());
    }

    #[tokio::test]
    async fn test_valid_response_is_parsed_and_clamped() {
        let llm = GenClient::with_backend(Arc::new(FixedBackend(
            r#"{"overall": 120, "keywordMatch": 80, "formatting": 90,
                "sectionCompleteness": 85, "readability": 88,
                "missingKeywords": ["terraform"], "suggestions": [], "redFlags": []}"#,
        )));
        let score = score_sections(&[summary_section()], Some("a ".repeat(30).as_str()), &llm).await;
        assert_eq!(score.overall, 100);
        assert_eq!(score.keyword_match, 80);
        assert_eq!(score.missing_keywords, vec!["terraform".to_string()]);
    }

    #[test]
    fn test_prompt_includes_jd_when_present() {
        let prompt = build_prompt(&[summary_section()], Some("Build payment rails in Rust")).unwrap();
        assert!(prompt.contains("Build payment rails in Rust"));
        assert!(prompt.contains("TARGET JOB DESCRIPTION"));
    }

    #[test]
    fn test_prompt_notes_missing_jd() {
        let prompt = build_prompt(&[summary_section()], None).unwrap();
        assert!(prompt.contains("No target job description"));
    }
}
