//! Shared test doubles: a recording [`MockBot`], a [`ScriptedLlm`], and message builders.
#![allow(dead_code)]

use async_trait::async_trait;
use llm_client::{CompletionOptions, LlmClient};
use prompt::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use telegram_bot::{
    Bot, Chat, ChatTarget, DbotError, Media, MediaKind, Message, MessageKind, Result, StickerRef,
    User,
};

pub const USER_ID: i64 = 42;
pub const CHAT_ID: i64 = 4242;

/// One outbound call made through [`MockBot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Html { chat_id: i64, html: String },
    Reply { message_id: String, text: String },
    Sticker { chat_id: i64, file_id: String },
    Copy { message_id: String, to: ChatTarget, caption: Option<String> },
    Delete { message_id: String },
}

/// Records every call; sticker sets and files are canned.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<Sent>>,
    pub sticker_sets: HashMap<String, Vec<String>>,
    pub files: HashMap<String, Vec<u8>>,
    /// Copies to this target fail.
    pub fail_copy_to: Option<ChatTarget>,
    pub fail_delete: bool,
    /// Reported as the bot's own username.
    pub username: Option<String>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()> {
        self.record(Sent::Html {
            chat_id: chat.id,
            html: html.to_string(),
        });
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(Sent::Reply {
            message_id: message.id.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_sticker(&self, chat: &Chat, file_id: &str) -> Result<()> {
        self.record(Sent::Sticker {
            chat_id: chat.id,
            file_id: file_id.to_string(),
        });
        Ok(())
    }

    async fn sticker_set_file_ids(&self, set_name: &str) -> Result<Vec<String>> {
        self.sticker_sets
            .get(set_name)
            .cloned()
            .ok_or_else(|| DbotError::Bot(format!("STICKERSET_INVALID: {}", set_name)))
    }

    async fn copy_message(
        &self,
        message: &Message,
        to: &ChatTarget,
        html_caption: Option<&str>,
    ) -> Result<String> {
        if self.fail_copy_to.as_ref() == Some(to) {
            return Err(DbotError::Bot("Bad Request: chat not found".to_string()));
        }
        self.record(Sent::Copy {
            message_id: message.id.clone(),
            to: to.clone(),
            caption: html_caption.map(str::to_string),
        });
        Ok("900".to_string())
    }

    async fn delete_message(&self, message: &Message) -> Result<()> {
        if self.fail_delete {
            return Err(DbotError::Bot("message can't be deleted".to_string()));
        }
        self.record(Sent::Delete {
            message_id: message.id.clone(),
        });
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.files
            .get(file_id)
            .cloned()
            .ok_or_else(|| DbotError::Bot(format!("file not found: {}", file_id)))
    }

    fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

/// Returns queued replies in order and records `(model, messages, options)` per call.
pub struct ScriptedLlm {
    replies: Mutex<Vec<anyhow::Result<String>>>,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>, CompletionOptions)>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<anyhow::Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>, CompletionOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn get_llm_response_with_messages(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> anyhow::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages, options));
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted reply")))
    }
}

pub fn user() -> User {
    User {
        id: USER_ID,
        username: Some("ada".to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        is_bot: false,
    }
}

pub fn message(id: &str, content: &str, kind: MessageKind) -> Message {
    Message {
        id: id.to_string(),
        user: user(),
        chat: Chat {
            id: CHAT_ID,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        kind,
        created_at: chrono::Utc::now(),
    }
}

pub fn text(content: &str) -> Message {
    message("10", content, MessageKind::Text)
}

pub fn media(kind: MediaKind, file_name: Option<&str>, caption: &str) -> Message {
    message(
        "11",
        caption,
        MessageKind::Media(Media {
            kind,
            file_id: "file-1".to_string(),
            file_name: file_name.map(str::to_string),
        }),
    )
}

pub fn sticker(file_id: &str, set_name: Option<&str>) -> Message {
    message(
        "12",
        "",
        MessageKind::Sticker(StickerRef {
            file_id: file_id.to_string(),
            set_name: set_name.map(str::to_string),
        }),
    )
}
