// Request and response shapes of the web front-end

use serde::{Deserialize, Serialize};

// Form bodies. Missing fields deserialize as empty strings so that the
// handlers, not the body filter, decide how to answer.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

// POST /chat response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

// Frames pushed over /ws
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A completed chat turn
    Turn { user: String, reply: String },
    /// The transcript was reset by "new chat"
    Cleared,
}
