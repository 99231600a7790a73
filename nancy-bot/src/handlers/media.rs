//! Media repost: re-sends photos, videos, documents and friends with a movie-metadata caption,
//! archives the original to the log channel, then deletes it.

use async_trait::async_trait;
use movie_meta::{MediaCaption, MovieDetails, MovieExtractor, Sender, TechMetadata};
use std::sync::Arc;
use telegram_bot::{Bot, ChatTarget, Handler, HandlerResponse, Media, MediaKind, Message, Result};
use tracing::{debug, error, info, instrument};

pub const MSG_MEDIA_FAILED: &str = "Could not process media.";

/// Name fed to the extractor: the attachment's file name, or a placeholder per kind.
pub fn media_filename(media: &Media) -> &str {
    let named = match media.kind {
        MediaKind::Document | MediaKind::Animation | MediaKind::Audio | MediaKind::Video => {
            media.file_name.as_deref().filter(|n| !n.trim().is_empty())
        }
        _ => None,
    };
    match (named, media.kind) {
        (Some(name), _) => name,
        (None, MediaKind::Video) => "video",
        (None, _) => "media",
    }
}

pub struct MediaHandler {
    bot: Arc<dyn Bot>,
    extractor: Option<Arc<MovieExtractor>>,
    log_channel: Option<ChatTarget>,
}

impl MediaHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        extractor: Option<Arc<MovieExtractor>>,
        log_channel: Option<ChatTarget>,
    ) -> Self {
        Self {
            bot,
            extractor,
            log_channel,
        }
    }

    /// Movie details and release metadata; failures are logged and yield `None`.
    async fn extract(
        &self,
        filename: &str,
        caption: &str,
    ) -> (Option<MovieDetails>, Option<TechMetadata>) {
        let Some(extractor) = self.extractor.as_deref() else {
            return (None, None);
        };
        let combined = format!("{} {}", filename, caption);
        let combined = combined.trim();
        if combined.is_empty() {
            return (None, None);
        }

        let details = match extractor.process(filename, caption).await {
            Ok(details) => details,
            Err(e) => {
                error!(error = %e, filename = %filename, "Movie extraction failed");
                None
            }
        };
        let metadata = match extractor.extract_technical_metadata(combined).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                error!(error = %e, filename = %filename, "Metadata extraction failed");
                None
            }
        };
        debug!(details = ?details, metadata = ?metadata, "Media extraction done");
        (details, metadata)
    }

    async fn archive(&self, message: &Message, details: Option<&MovieDetails>) {
        let Some(target) = &self.log_channel else {
            debug!("LOG_CHANNEL_ID not set; skipping log copy");
            return;
        };
        let caption = details
            .and_then(MovieDetails::poster_url)
            .map(|poster| format!("Start: {}", poster));
        match self
            .bot
            .copy_message(message, target, caption.as_deref())
            .await
        {
            Ok(_) => info!(target = ?target, "Media also copied to log channel"),
            Err(e) => error!(error = %e, target = ?target, "Failed to copy media to log channel"),
        }
    }
}

#[async_trait]
impl Handler for MediaHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(media) = message.media() else {
            return Ok(HandlerResponse::Continue);
        };
        let filename = media_filename(media);
        let original_caption = message.content.as_str();
        debug!(filename = %filename, caption_len = original_caption.chars().count(), "Processing media");

        let (details, metadata) = self.extract(filename, original_caption).await;

        let sender = (message.user.id != 0).then(|| Sender {
            id: message.user.id,
            username: message.user.username.clone(),
            full_name: message.user.full_name(),
        });
        let caption = MediaCaption {
            details: details.as_ref(),
            metadata,
            original_caption,
            sender: sender.as_ref(),
        }
        .render();

        match self
            .bot
            .copy_message(message, &ChatTarget::from(&message.chat), Some(&caption))
            .await
        {
            Ok(copy_id) => info!(copy_id = %copy_id, "Media resent with new caption"),
            Err(e) => {
                error!(error = %e, "Failed to copy media message");
                self.bot.reply_to(message, MSG_MEDIA_FAILED).await?;
                return Ok(HandlerResponse::Reply(MSG_MEDIA_FAILED.to_string()));
            }
        }

        self.archive(message, details.as_ref()).await;

        if let Err(e) = self.bot.delete_message(message).await {
            debug!(error = %e, "Delete original failed");
        }
        Ok(HandlerResponse::Stop)
    }
}
