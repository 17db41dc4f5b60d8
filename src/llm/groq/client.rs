//! Groq chat-completion client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::config::LlmConfig;
use crate::llm::core::{error::LlmError, provider::ChatProvider};

use super::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Default endpoint of the OpenAI-compatible API
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Client for the Groq chat-completion endpoint
pub struct GroqClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer token
    api_key: String,
    /// Full URL of the chat-completion endpoint
    endpoint: String,
    /// Model to use
    model: String,
}

impl GroqClient {
    /// Create a client against the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Create a client against an arbitrary endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank or the HTTP client cannot be built.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidRequest("API key is empty".to_string()));
        }

        let http_client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::with_endpoint(&config.api_key, &config.endpoint, &config.model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn make_request(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatCompletionRequest::single_user(prompt, &self.model);

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        // Check status
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "chat completion failed");
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "chat completion received");

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        parsed.first_content().ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.make_request(prompt).await
    }
}
