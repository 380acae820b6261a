//! Chat-completion client for OpenAI-compatible endpoints.
//!
//! A completion is a single user message in, the first choice's text out.
//! Failures are reported once with a readable message; nothing is retried.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured (set OPENAI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("completion request failed: {message}")]
    RequestFailed { message: String },

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected completion response: {message}")]
    ParseError { message: String },
}

/// Produces a text completion for a prompt.
pub trait CompletionService: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Base URL; `/chat/completions` is appended.
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Blocking client; run it off the UI thread.
pub struct OpenAiClient {
    config: CompletionConfig,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl OpenAiClient {
    pub fn new(config: CompletionConfig, api_key: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            config,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            agent,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

impl CompletionService for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        tracing::info!(model = %self.config.model, prompt_chars = prompt.len(), "requesting completion");

        let resp = self
            .agent
            .post(&self.endpoint())
            .set("Authorization", &format!("Bearer {api_key}"))
            .send_json(body)
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => CompletionError::Status {
                    status,
                    body: resp.into_string().unwrap_or_default(),
                },
                other => CompletionError::RequestFailed {
                    message: other.to_string(),
                },
            })?;

        let resp_str = resp.into_string().map_err(|e| CompletionError::ParseError {
            message: e.to_string(),
        })?;

        first_choice(&resp_str)
    }
}

/// Text of the first choice in a chat-completion response body.
fn first_choice(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::ParseError {
            message: e.to_string(),
        })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::ParseError {
            message: "missing 'choices[0].message.content'".into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = CompletionConfig::default();
        assert_eq!(config.api_base, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_missing_key_fails_before_any_request() {
        let client = OpenAiClient::new(CompletionConfig::default(), Some("  ".into()));
        let err = client.complete("hello").unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_unreachable_endpoint_is_a_request_error() {
        let config = CompletionConfig {
            api_base: "http://127.0.0.1:1".into(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = OpenAiClient::new(config, Some("sk-test".into()));
        let err = client.complete("hello").unwrap_err();
        assert!(matches!(err, CompletionError::RequestFailed { .. }));
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = CompletionConfig {
            api_base: "http://localhost:8080/v1/".into(),
            ..Default::default()
        };
        let client = OpenAiClient::new(config, None);
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_first_choice() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Bonjour"}}]}"#;
        assert_eq!(first_choice(body).unwrap(), "Bonjour");
    }

    #[test]
    fn test_first_choice_missing_content() {
        assert!(matches!(
            first_choice(r#"{"choices":[]}"#),
            Err(CompletionError::ParseError { .. })
        ));
        assert!(matches!(
            first_choice("not json"),
            Err(CompletionError::ParseError { .. })
        ));
    }
}
