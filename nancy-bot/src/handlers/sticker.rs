//! Sticker echo: answers a sticker with another one from the same set.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use telegram_bot::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{debug, error, instrument};

/// Random sticker from `set` other than `received`; the whole set when that leaves nothing.
pub fn pick_sticker<'a>(set: &'a [String], received: &str) -> Option<&'a str> {
    let others: Vec<&str> = set
        .iter()
        .map(String::as_str)
        .filter(|id| *id != received)
        .collect();
    let candidates: Vec<&str> = if others.is_empty() {
        set.iter().map(String::as_str).collect()
    } else {
        others
    };
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rand::rng().random_range(0..candidates.len())])
}

pub struct StickerHandler {
    bot: Arc<dyn Bot>,
}

impl StickerHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StickerHandler {
    /// Send failures are logged, never replied. Stickers from bots are dropped.
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(sticker) = message.sticker() else {
            return Ok(HandlerResponse::Continue);
        };
        if message.user.is_bot {
            return Ok(HandlerResponse::Stop);
        }

        let Some(set_name) = sticker.set_name.as_deref() else {
            if let Err(e) = self.bot.send_sticker(&message.chat, &sticker.file_id).await {
                debug!(error = %e, "Failed to echo sticker without set");
            }
            return Ok(HandlerResponse::Stop);
        };

        let result = match self.bot.sticker_set_file_ids(set_name).await {
            Ok(set) => match pick_sticker(&set, &sticker.file_id) {
                Some(choice) => self.bot.send_sticker(&message.chat, choice).await,
                None => Ok(()),
            },
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            error!(error = %e, set_name = %set_name, "Failed to fetch/send random sticker");
        }
        Ok(HandlerResponse::Stop)
    }
}
