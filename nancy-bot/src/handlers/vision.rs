//! Photo analysis: downloads the largest size and replies with the vision model's description.

use async_trait::async_trait;
use std::sync::Arc;
use telegram_bot::{Bot, Handler, HandlerResponse, MediaKind, Message, Result};
use tracing::{error, instrument};

use crate::vision::ImageAnalyzer;

pub const MSG_VISION_FAILED: &str = "Error analyzing image.";

pub struct VisionHandler {
    bot: Arc<dyn Bot>,
    analyzer: Arc<ImageAnalyzer>,
}

impl VisionHandler {
    pub fn new(bot: Arc<dyn Bot>, analyzer: Arc<ImageAnalyzer>) -> Self {
        Self { bot, analyzer }
    }

    async fn describe(&self, message: &Message, file_id: &str) -> anyhow::Result<String> {
        let image = self.bot.download_file(file_id).await?;
        let question = Some(message.content.as_str()).filter(|c| !c.trim().is_empty());
        self.analyzer
            .analyze(&message.user.full_name(), &image, question)
            .await
    }
}

#[async_trait]
impl Handler for VisionHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(photo) = message.media().filter(|m| m.kind == MediaKind::Photo) else {
            return Ok(HandlerResponse::Continue);
        };

        let text = match self.describe(message, &photo.file_id).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => MSG_VISION_FAILED.to_string(),
            Err(e) => {
                error!(error = %e, model = %self.analyzer.model(), "Image analysis failed");
                MSG_VISION_FAILED.to_string()
            }
        };
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
