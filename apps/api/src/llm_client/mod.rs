/// Generation client, the single point of entry for all LLM calls.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// Fallback policy: one attempt against the primary model; on failure or an
/// empty result, one attempt against the smaller fallback model. No backoff
/// loops. When both fail, callers apply their own deterministic, non-AI
/// fallback instead of propagating an empty result to the user.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use prompts::{JSON_ONLY_SYSTEM, PROSE_SYSTEM};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Primary model for all AI tasks. Hardcoded to prevent drift.
pub const PRIMARY_MODEL: &str = "claude-sonnet-4-5";
/// Smaller, faster model tried once when the primary call fails.
pub const FALLBACK_MODEL: &str = "claude-haiku-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Whether the model is asked for a single JSON object or free prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Prose,
}

impl OutputMode {
    fn system_fragment(self) -> &'static str {
        match self {
            OutputMode::Json => JSON_ONLY_SYSTEM,
            OutputMode::Prose => PROSE_SYSTEM,
        }
    }
}

/// A successful completion, tagged with the model that produced it so
/// callers can surface which tier answered.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

/// The raw completion seam. `AnthropicBackend` is the production
/// implementation; tests substitute stubs to exercise the fallback policy
/// without network access.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, model: &str, system: &str, prompt: &str)
        -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic Messages API backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

pub struct AnthropicBackend {
    client: Client,
    api_key: String,
}

impl AnthropicBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionBackend for AnthropicBackend {
    async fn complete(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request_body = AnthropicRequest {
            model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnthropicResponse = response.json().await.map_err(LlmError::Http)?;

        debug!(
            "LLM call succeeded: model={}, input_tokens={}, output_tokens={}",
            model, parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed
            .content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// GenClient: model selection + fallback policy
// ────────────────────────────────────────────────────────────────────────────

/// The generation client shared by all AI endpoints.
#[derive(Clone)]
pub struct GenClient {
    backend: Arc<dyn CompletionBackend>,
}

impl GenClient {
    pub fn new(api_key: String) -> Self {
        Self {
            backend: Arc::new(AnthropicBackend::new(api_key)),
        }
    }

    /// Constructs a client over an arbitrary backend. Used by tests.
    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Runs one request: primary model first, fallback model on failure.
    /// `task_system` is the task's own instruction; the mode fragment is
    /// prepended so the output contract always leads the system prompt.
    pub async fn generate(
        &self,
        prompt: &str,
        task_system: &str,
        mode: OutputMode,
    ) -> Result<Completion, LlmError> {
        let system = format!("{} {}", mode.system_fragment(), task_system);

        match self.backend.complete(PRIMARY_MODEL, &system, prompt).await {
            Ok(text) => Ok(Completion {
                text,
                model: PRIMARY_MODEL.to_string(),
            }),
            Err(primary_err) => {
                warn!(
                    "Primary model {} failed ({primary_err}), trying fallback {}",
                    PRIMARY_MODEL, FALLBACK_MODEL
                );
                let text = self.backend.complete(FALLBACK_MODEL, &system, prompt).await?;
                Ok(Completion {
                    text,
                    model: FALLBACK_MODEL.to_string(),
                })
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
