//! LLM client layer
//!
//! A single outbound request/response cycle against a hosted chat-completion
//! API. All three front-ends go through the [`ChatProvider`] trait.

pub mod core;
pub mod groq;

// Re-export commonly used types
pub use core::{
    error::LlmError,
    provider::{create_provider, ChatProvider},
};
pub use groq::GroqClient;
