//! Chat identity and send-target types.

use serde::{Deserialize, Serialize};

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Destination of a copied message: numeric chat id or public `@username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    /// Parses `"@channel"` or `"-1001234"`. Blank or anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() > 1 && raw.starts_with('@') {
            return Some(Self::Username(raw.to_string()));
        }
        raw.parse().ok().map(Self::Id)
    }
}

impl From<&Chat> for ChatTarget {
    fn from(chat: &Chat) -> Self {
        Self::Id(chat.id)
    }
}
