//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use crate::core::{parse_message_id, Bot as CoreBot, Chat, ChatTarget, DbotError, Message, Result};
use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile, MessageId, ParseMode, Recipient, ReplyParameters};
use tracing::debug;

fn bot_err(e: impl std::fmt::Display) -> DbotError {
    DbotError::Bot(e.to_string())
}

fn recipient(target: &ChatTarget) -> Recipient {
    match target {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
    username: Option<String>,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self {
            bot,
            username: None,
        }
    }

    /// Sets the username reported by [`CoreBot::username`], usually from `getMe`.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), html)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .send_message(ChatId(message.chat.id), text)
            .reply_parameters(ReplyParameters::new(MessageId(id)).allow_sending_without_reply())
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn send_sticker(&self, chat: &Chat, file_id: &str) -> Result<()> {
        self.bot
            .send_sticker(ChatId(chat.id), InputFile::file_id(FileId(file_id.to_string())))
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn sticker_set_file_ids(&self, set_name: &str) -> Result<Vec<String>> {
        let set = self.bot.get_sticker_set(set_name).await.map_err(bot_err)?;
        Ok(set.stickers.into_iter().map(|s| s.file.id.0).collect())
    }

    async fn copy_message(
        &self,
        message: &Message,
        to: &ChatTarget,
        html_caption: Option<&str>,
    ) -> Result<String> {
        let id = parse_message_id(&message.id)?;
        let request = self
            .bot
            .copy_message(recipient(to), ChatId(message.chat.id), MessageId(id));
        let copied = match html_caption {
            Some(caption) => request.caption(caption).parse_mode(ParseMode::Html).await,
            None => request.await,
        }
        .map_err(bot_err)?;
        debug!(from = %message.id, to = ?to, copy_id = copied.0, "Message copied");
        Ok(copied.0.to_string())
    }

    async fn delete_message(&self, message: &Message) -> Result<()> {
        let id = parse_message_id(&message.id)?;
        self.bot
            .delete_message(ChatId(message.chat.id), MessageId(id))
            .await
            .map_err(bot_err)?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_err)?;
        let mut bytes = Vec::new();
        self.bot
            .download_file(&file.path, &mut bytes)
            .await
            .map_err(bot_err)?;
        Ok(bytes)
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}
