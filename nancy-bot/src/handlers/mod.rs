//! Message router: handlers in chain order commands → sticker → vision → media → chat.
//!
//! Each handler returns `Continue` for updates that are not its kind.

mod chat;
mod commands;
mod media;
mod sticker;
mod vision;

pub use chat::{ChatHandler, MSG_REPLY_FAILED};
pub use commands::{parse_command, Command, CommandHandler, HELP_TEXT};
pub use media::{media_filename, MediaHandler, MSG_MEDIA_FAILED};
pub use sticker::{pick_sticker, StickerHandler};
pub use vision::{VisionHandler, MSG_VISION_FAILED};

/// Reply when no Groq API key is configured.
pub const MSG_AI_NOT_READY: &str = "AI not ready.";
