//! Provider trait for chat-completion backends

use async_trait::async_trait;
use std::sync::Arc;

use super::error::LlmError;
use crate::config::LlmConfig;
use crate::llm::groq::GroqClient;

/// Interface every front-end talks to
///
/// One prompt in, the text of the model's reply out. There is no streaming
/// and no conversation context: each call carries a single user message.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Create the provider described by `config`
///
/// # Example
///
/// ```rust,no_run
/// use askai::config::LlmConfig;
/// use askai::llm::create_provider;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = create_provider(&LlmConfig::new("gsk_example"))?;
/// let reply = provider.complete("Hello!").await?;
/// # Ok(())
/// # }
/// ```
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn ChatProvider>, LlmError> {
    let client = GroqClient::from_config(config)?;
    Ok(Arc::new(client))
}
