//! Text enhancement. Single-field enhancement never fails: when both model
//! tiers are down the caller gets a deterministic capitalization fallback,
//! tagged so the UI can tell the user no AI was involved.
//!
//! Batch enhancement fans out one call per item through a bounded task
//! group. Items target disjoint fields, so nothing is shared during the
//! fan-out and only the join synchronizes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use crate::ai::prompts::{ENHANCE_SYSTEM, ENHANCE_TEMPLATE};
use crate::llm_client::{GenClient, OutputMode};

/// In-flight LLM calls allowed during a batch fan-out.
const MAX_CONCURRENT_ENHANCEMENTS: usize = 4;

const DEFAULT_ACTION: &str = "make it more impactful";

/// Outcome of one enhancement, successful or degraded.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Enhanced {
    pub enhanced_text: String,
    /// Model that produced the text; absent on the deterministic fallback.
    pub model_used: Option<String>,
    pub fallback: bool,
}

/// One item of a batch enhancement request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceItem {
    pub id: String,
    pub text: String,
    pub section_type: String,
    #[serde(default)]
    pub action: Option<String>,
}

/// Per-item result of a batch enhancement, keyed back to the request id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedItem {
    pub id: String,
    #[serde(flatten)]
    pub result: Enhanced,
}

/// Enhances a single piece of text. Never returns an error: AI failure
/// degrades to `capitalize_fallback`.
pub async fn enhance_text(
    text: &str,
    section_type: &str,
    action: Option<&str>,
    llm: &GenClient,
) -> Enhanced {
    let prompt = ENHANCE_TEMPLATE
        .replace("{section_type}", section_type)
        .replace("{action}", action.unwrap_or(DEFAULT_ACTION))
        .replace("{text}", text);

    match llm.generate(&prompt, ENHANCE_SYSTEM, OutputMode::Prose).await {
        Ok(completion) => {
            let cleaned = completion.text.trim();
            if cleaned.is_empty() {
                warn!("Enhancement returned blank text, using capitalization fallback");
                return fallback_result(text);
            }
            Enhanced {
                enhanced_text: cleaned.to_string(),
                model_used: Some(completion.model),
                fallback: false,
            }
        }
        Err(e) => {
            warn!("Enhancement LLM call failed ({e}), using capitalization fallback");
            fallback_result(text)
        }
    }
}

/// Enhances every item concurrently and joins all results, preserving the
/// input order. Individual failures degrade per item; the batch never fails.
pub async fn enhance_batch(items: Vec<EnhanceItem>, llm: &GenClient) -> Vec<EnhancedItem> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_ENHANCEMENTS));
    let mut join_set = JoinSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let llm = llm.clone();
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            // The semaphore is never closed, so acquire cannot fail.
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            let result =
                enhance_text(&item.text, &item.section_type, item.action.as_deref(), &llm).await;
            (
                index,
                EnhancedItem {
                    id: item.id,
                    result,
                },
            )
        });
    }

    let mut indexed: Vec<(usize, EnhancedItem)> = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(pair) => indexed.push(pair),
            Err(e) => warn!("Enhancement task panicked: {e}"),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, item)| item).collect()
}

fn fallback_result(original: &str) -> Enhanced {
    Enhanced {
        enhanced_text: capitalize_fallback(original),
        model_used: None,
        fallback: true,
    }
}

/// Deterministic non-AI transformation: capitalize the first letter and
/// terminate with a period when no sentence punctuation is present.
pub fn capitalize_fallback(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut chars = trimmed.chars();
    let first = chars.next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
    let mut out = first + chars.as_str();

    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::{CompletionBackend, LlmError, FALLBACK_MODEL, PRIMARY_MODEL};

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

    struct UppercasingBackend;

    #[async_trait]
    impl CompletionBackend for UppercasingBackend {
        async fn complete(
            &self,
            _model: &str,
            _system: &str,
            prompt: &str,
        ) -> Result<String, LlmError> {
            // Echo the TEXT block uppercased, roughly what a rewrite returns.
            let text = prompt.split("TEXT:").nth(1).unwrap_or("").trim();
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_capitalize_fallback_adds_period() {
        assert_eq!(capitalize_fallback("hello world"), "Hello world.");
    }

    #[test]
    fn test_capitalize_fallback_keeps_existing_punctuation() {
        assert_eq!(capitalize_fallback("shipped the release!"), "Shipped the release!");
        assert_eq!(capitalize_fallback("Done."), "Done.");
    }

    #[test]
    fn test_capitalize_fallback_empty_input() {
        assert_eq!(capitalize_fallback("   "), "");
    }

    #[tokio::test]
    async fn test_enhance_degrades_to_capitalization_on_failure() {
        let llm = GenClient::with_backend(Arc::new(DeadBackend));
        let result = enhance_text("hello world", "summary", None, &llm).await;
        assert_eq!(result.enhanced_text, "Hello world.");
        assert!(result.fallback);
        assert!(result.model_used.is_none());
    }

    #[tokio::test]
    async fn test_enhance_reports_model_on_success() {
        let llm = GenClient::with_backend(Arc::new(UppercasingBackend));
        let result = enhance_text("led the team", "experience", Some("tighten"), &llm).await;
        assert!(!result.fallback);
        assert_eq!(result.model_used.as_deref(), Some(PRIMARY_MODEL));
        assert_eq!(result.enhanced_text, "LED THE TEAM");
    }

    #[tokio::test]
    async fn test_enhance_batch_preserves_input_order() {
        let llm = GenClient::with_backend(Arc::new(UppercasingBackend));
        let items = vec![
            EnhanceItem {
                id: "b1".to_string(),
                text: "first bullet".to_string(),
                section_type: "experience".to_string(),
                action: None,
            },
            EnhanceItem {
                id: "b2".to_string(),
                text: "second bullet".to_string(),
                section_type: "experience".to_string(),
                action: None,
            },
            EnhanceItem {
                id: "b3".to_string(),
                text: "third bullet".to_string(),
                section_type: "experience".to_string(),
                action: None,
            },
        ];
        let results = enhance_batch(items, &llm).await;
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3"]);
        assert_eq!(results[0].result.enhanced_text, "FIRST BULLET");
    }

    #[tokio::test]
    async fn test_enhance_batch_degrades_per_item() {
        let llm = GenClient::with_backend(Arc::new(DeadBackend));
        let items = vec![EnhanceItem {
            id: "b1".to_string(),
            text: "wrote docs".to_string(),
            section_type: "experience".to_string(),
            action: None,
        }];
        let results = enhance_batch(items, &llm).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].result.fallback);
        assert_eq!(results[0].result.enhanced_text, "Wrote docs.");
        // FALLBACK_MODEL is also tried before degrading; it must not be reported.
        assert_ne!(results[0].result.model_used.as_deref(), Some(FALLBACK_MODEL));
    }
}
