//! Core abstractions shared by all providers

pub mod error;
pub mod provider;
