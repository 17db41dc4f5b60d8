//! Application-level error

use thiserror::Error;

use crate::config::ConfigError;
use crate::llm::LlmError;
use crate::store::StoreError;

/// Anything that can stop a front-end from starting or running
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
