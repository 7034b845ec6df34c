//! OpenAI-compatible adapter for signal inference.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `InferencePort`; classifies quota/rate failures separately from other failures.

use crate::domain::DomainError;
use crate::ports::{InferencePort, Prompt};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for analysis requests.
const TEMPERATURE: f32 = 0.2;

/// OpenAI-compatible inference adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    /// * `timeout` - Whole-request timeout
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    /// Map a failed call to the quota or transport variant.
    fn classify_failure(status: Option<StatusCode>, detail: String) -> DomainError {
        let lower = detail.to_lowercase();
        let quota = status == Some(StatusCode::TOO_MANY_REQUESTS)
            || lower.contains("quota")
            || lower.contains("rate limit")
            || lower.contains("rate_limit");
        if quota {
            DomainError::InferenceQuotaExhausted(detail)
        } else {
            DomainError::InferenceTransport(detail)
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait::async_trait]
impl InferencePort for OpenAiAdapter {
    async fn complete(&self, prompt: &Prompt) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = prompt.user.len(),
            "sending item to AI for analysis"
        );

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Self::classify_failure(None, format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(Self::classify_failure(
                Some(status),
                format!(
                    "API error {}: {}",
                    status,
                    text.chars().take(200).collect::<String>()
                ),
            ));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            DomainError::InferenceTransport(format!("Failed to parse API response: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                DomainError::InferenceTransport("No response choices returned".to_string())
            })?;

        debug!(raw_len = content.len(), "received AI response");
        Ok(content.trim().to_string())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn prompt() -> Prompt {
        Prompt {
            system: "sys".to_string(),
            user: "analyze this".to_string(),
        }
    }

    async fn adapter(server: &mockito::ServerGuard) -> OpenAiAdapter {
        OpenAiAdapter::new(
            format!("{}/v1/chat/completions", server.url()),
            "sk-test".to_string(),
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn classifies_quota_conditions() {
        assert!(matches!(
            OpenAiAdapter::classify_failure(Some(StatusCode::TOO_MANY_REQUESTS), "slow down".into()),
            DomainError::InferenceQuotaExhausted(_)
        ));
        assert!(matches!(
            OpenAiAdapter::classify_failure(
                Some(StatusCode::FORBIDDEN),
                "You exceeded your current QUOTA".into()
            ),
            DomainError::InferenceQuotaExhausted(_)
        ));
        assert!(matches!(
            OpenAiAdapter::classify_failure(Some(StatusCode::UNAUTHORIZED), "invalid key".into()),
            DomainError::InferenceTransport(_)
        ));
        assert!(matches!(
            OpenAiAdapter::classify_failure(None, "connection refused".into()),
            DomainError::InferenceTransport(_)
        ));
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "analyze this"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  {\"a\":1}  "}}]}"#)
            .create_async()
            .await;

        let text = adapter(&server).await.complete(&prompt()).await.unwrap();
        assert_eq!(text, r#"{"a":1}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rate_limit_is_quota_exhausted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"code":"insufficient_quota","message":"You exceeded your current quota"}}"#)
            .create_async()
            .await;

        let err = adapter(&server).await.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, DomainError::InferenceQuotaExhausted(_)));
    }

    #[tokio::test]
    async fn server_error_is_transport() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let err = adapter(&server).await.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, DomainError::InferenceTransport(_)));
    }

    #[tokio::test]
    async fn empty_choices_is_transport() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let err = adapter(&server).await.complete(&prompt()).await.unwrap_err();
        assert!(matches!(err, DomainError::InferenceTransport(_)));
    }
}
