//! Terminal chat client for a personal AI assistant.
//!
//! The client keeps one config record (an API credential and a dark-mode
//! flag) in a JSON file, forwards each message to the assistant endpoint as
//! `{command}` and shows the returned `{response}` or `{error}`. The `server`
//! module is that endpoint, backed by a chat-completions API.

pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod presets;
pub mod server;
pub mod settings;
pub mod theme;
pub mod tui;
pub mod ui;

pub use error::{AssistError, Result};
