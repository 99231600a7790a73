//! Free text → LLM reply.

use async_trait::async_trait;
use std::sync::Arc;
use telegram_bot::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use tracing::{error, instrument};

use crate::reply::ReplyGenerator;

use super::MSG_AI_NOT_READY;

pub const MSG_REPLY_FAILED: &str = "Error generating reply.";

pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    replies: Option<Arc<ReplyGenerator>>,
}

impl ChatHandler {
    pub fn new(bot: Arc<dyn Bot>, replies: Option<Arc<ReplyGenerator>>) -> Self {
        Self { bot, replies }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text {
            return Ok(HandlerResponse::Continue);
        }
        let text = message.content.trim();
        // Unknown commands are dropped silently.
        if text.is_empty() || text.starts_with('/') {
            return Ok(HandlerResponse::Stop);
        }

        let Some(replies) = self.replies.as_deref() else {
            self.bot.reply_to(message, MSG_AI_NOT_READY).await?;
            return Ok(HandlerResponse::Reply(MSG_AI_NOT_READY.to_string()));
        };

        let reply = match replies
            .generate_reply(message.user.id, message.chat.id, &message.user.full_name(), text)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "AI generation failed");
                MSG_REPLY_FAILED.to_string()
            }
        };
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
