// src/narrative/openai_client.rs
use super::CompletionService;
use crate::config::OpenAiSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completion client for the OpenAI API
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// The API key may be absent: requests then fail without touching the network
    pub fn new(settings: &OpenAiSettings, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// First choice's message content, trimmed
pub(crate) fn first_choice_content(response: ChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .context("Completion response contained no choices")?;

    choice
        .message
        .content
        .map(|content| content.trim().to_string())
        .context("Completion choice has no message content")
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("OPENAI_API_KEY environment variable not set")?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        info!("Sending request to OpenAI API (model: {})", self.model);

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_ENDPOINT))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|body| body.error.message)
                .unwrap_or(error_text);
            error!("OpenAI API error {}: {}", status, detail);
            anyhow::bail!("OpenAI API returned error {}: {}", status, detail);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        info!("Successfully received response from OpenAI API");
        first_choice_content(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL};

    fn settings(api_key: Option<&str>) -> OpenAiSettings {
        OpenAiSettings {
            api_key: api_key.map(str::to_string),
            base_url: DEFAULT_OPENAI_API_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }

    #[test]
    fn test_request_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "Summarize this LinkedIn profile:\nhi".to_string(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_first_choice_is_trimmed() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  A summary.\n"}},{"index":1,"message":{"role":"assistant","content":"other"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_content(response).unwrap(), "A summary.");
    }

    #[test]
    fn test_empty_choices_is_error() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(first_choice_content(response).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let client = OpenAiClient::new(&settings(None), 5).unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY environment variable not set");
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let mut s = settings(Some("sk-test"));
        s.base_url = "http://localhost:1234/v1/".to_string();
        let client = OpenAiClient::new(&s, 5).unwrap();
        assert_eq!(client.base_url, "http://localhost:1234/v1");
        assert_eq!(client.model(), DEFAULT_OPENAI_MODEL);
    }
}
