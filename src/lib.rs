// Startup and ambient concerns
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

// Chat-completion client
pub mod llm;

// Users and chat history
pub mod store;

// Conversation state
pub mod session;
pub mod transcript;

// Front-ends
pub mod gui;
pub mod terminal;

// Web server
pub mod handlers;
pub mod models;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod ws;
