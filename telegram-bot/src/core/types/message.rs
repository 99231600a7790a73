//! Message types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// Kind of an attached media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Photo,
    Video,
    Document,
    Audio,
    Voice,
    Animation,
    VideoNote,
}

/// Attached media. For photos `file_id` is the largest size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub file_id: String,
    pub file_name: Option<String>,
}

/// Sticker file and the set it belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerRef {
    pub file_id: String,
    pub set_name: Option<String>,
}

/// What the message carries besides text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    #[default]
    Text,
    Sticker(StickerRef),
    Media(Media),
    /// Anything the bot does not handle (polls, locations, service messages).
    Other,
}

/// A single incoming message. `content` is the text, or the caption for media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn media(&self) -> Option<&Media> {
        match &self.kind {
            MessageKind::Media(media) => Some(media),
            _ => None,
        }
    }

    pub fn sticker(&self) -> Option<&StickerRef> {
        match &self.kind {
            MessageKind::Sticker(sticker) => Some(sticker),
            _ => None,
        }
    }

    /// Short kind label for logs.
    pub fn kind_label(&self) -> &'static str {
        match &self.kind {
            MessageKind::Text => "text",
            MessageKind::Sticker(_) => "sticker",
            MessageKind::Media(m) => match m.kind {
                MediaKind::Photo => "photo",
                MediaKind::Video => "video",
                MediaKind::Document => "document",
                MediaKind::Audio => "audio",
                MediaKind::Voice => "voice",
                MediaKind::Animation => "animation",
                MediaKind::VideoNote => "video_note",
            },
            MessageKind::Other => "other",
        }
    }
}
