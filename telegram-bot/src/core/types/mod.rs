//! Core types: user, chat, message, handler response, and Handler trait.
//!
//! One file per main type.

mod chat;
mod handler;
mod message;
mod response;
mod user;

pub use chat::{Chat, ChatTarget};
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::{Media, MediaKind, Message, MessageKind, StickerRef};
pub use response::HandlerResponse;
pub use user::User;
