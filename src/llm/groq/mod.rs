//! Groq provider implementation
//!
//! Talks to Groq's OpenAI-compatible chat-completion endpoint.

pub mod client;
pub mod types;

pub use client::{GroqClient, DEFAULT_ENDPOINT, DEFAULT_MODEL};
