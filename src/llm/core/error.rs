//! Error types for the LLM layer

use thiserror::Error;

/// Errors that can occur when calling the chat-completion API
#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection failures, DNS errors, timeouts
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx responses
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The API answered but returned no choices
    #[error("Empty response: the API returned no choices")]
    EmptyResponse,

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            LlmError::HttpError {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else if err.is_decode() {
            LlmError::SerializationError(err.to_string())
        } else {
            LlmError::Transport(err.to_string())
        }
    }
}
