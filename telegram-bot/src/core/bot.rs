//! Bot abstraction for everything handlers send to Telegram.
//!
//! [`Bot`] is transport-agnostic; [`crate::TelegramBotAdapter`] implements it via teloxide and
//! tests substitute a recording implementation.

use async_trait::async_trait;

use super::error::{DbotError, Result};
use super::types::{Chat, ChatTarget, Message};

/// Outbound operations used by handlers. Message ids are transport-specific strings.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends plain text to the chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends text rendered with HTML parse mode.
    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()>;
    /// Sends plain text as a reply to `message`.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a sticker by file id.
    async fn send_sticker(&self, chat: &Chat, file_id: &str) -> Result<()>;
    /// File ids of every sticker in the named set.
    async fn sticker_set_file_ids(&self, set_name: &str) -> Result<Vec<String>>;
    /// Copies `message` to `to`. `Some(caption)` replaces the caption (HTML parse mode);
    /// `None` keeps the original. Returns the id of the copy.
    async fn copy_message(
        &self,
        message: &Message,
        to: &ChatTarget,
        html_caption: Option<&str>,
    ) -> Result<String>;
    /// Deletes `message` from its chat.
    async fn delete_message(&self, message: &Message) -> Result<()>;
    /// Downloads a file's bytes by file id.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
    /// The bot's own username without `@`, when known.
    fn username(&self) -> Option<&str> {
        None
    }
}

/// Parses a message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}
