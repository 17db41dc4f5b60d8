//! Wire types for the OpenAI-compatible chat-completion API

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Messages in the conversation (always exactly one user message here)
    pub messages: Vec<ChatMessage>,
    /// Model identifier
    pub model: String,
}

impl ChatCompletionRequest {
    /// Build a request carrying a single user message
    pub fn single_user(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            model: model.into(),
        }
    }
}

/// A single message with a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response body; only the fields we read are modelled
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if any
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}
