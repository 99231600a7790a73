//! Converts teloxide users and messages to core types.

use crate::core::{
    Chat, Media, MediaKind, Message, MessageKind, StickerRef, ToCoreMessage, ToCoreUser, User,
};

/// Telegram user → core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
            is_bot: self.0.is_bot,
        }
    }
}

/// Telegram message → core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        Message {
            id: msg.id.0.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_default(),
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: self.chat_type().to_string(),
            },
            content: msg.text().or_else(|| msg.caption()).unwrap_or("").to_string(),
            kind: self.kind(),
            created_at: msg.date,
        }
    }
}

impl TelegramMessageWrapper<'_> {
    fn chat_type(&self) -> &'static str {
        let chat = &self.0.chat;
        if chat.is_private() {
            "private"
        } else if chat.is_supergroup() {
            "supergroup"
        } else if chat.is_group() {
            "group"
        } else if chat.is_channel() {
            "channel"
        } else {
            "unknown"
        }
    }

    fn kind(&self) -> MessageKind {
        let msg = self.0;
        let media = |kind, file_id: &teloxide::types::FileId, file_name: Option<&String>| {
            MessageKind::Media(Media {
                kind,
                file_id: file_id.0.clone(),
                file_name: file_name.cloned(),
            })
        };

        if let Some(sticker) = msg.sticker() {
            MessageKind::Sticker(StickerRef {
                file_id: sticker.file.id.0.clone(),
                set_name: sticker.set_name.clone(),
            })
        } else if let Some(largest) = msg.photo().and_then(|sizes| sizes.iter().max_by_key(|p| p.width * p.height)) {
            media(MediaKind::Photo, &largest.file.id, None)
        } else if let Some(animation) = msg.animation() {
            media(MediaKind::Animation, &animation.file.id, animation.file_name.as_ref())
        } else if let Some(video) = msg.video() {
            media(MediaKind::Video, &video.file.id, video.file_name.as_ref())
        } else if let Some(document) = msg.document() {
            media(MediaKind::Document, &document.file.id, document.file_name.as_ref())
        } else if let Some(audio) = msg.audio() {
            media(MediaKind::Audio, &audio.file.id, audio.file_name.as_ref())
        } else if let Some(voice) = msg.voice() {
            media(MediaKind::Voice, &voice.file.id, None)
        } else if let Some(note) = msg.video_note() {
            media(MediaKind::VideoNote, &note.file.id, None)
        } else if msg.text().is_some() {
            MessageKind::Text
        } else {
            MessageKind::Other
        }
    }
}
