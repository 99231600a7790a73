//! Error types for the bot core.

use thiserror::Error;

/// Top-level error for the bot framework.
#[derive(Error, Debug)]
pub enum DbotError {
    /// A Telegram API call failed (send, copy, delete, download).
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
