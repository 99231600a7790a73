//! # Telegram bot framework
//!
//! Core (Handler, Bot, Message), chain (HandlerChain), telegram (adapters, polling and webhook
//! runners), config (BaseConfig from env) and the log viewer. Applications supply the handlers
//! through [`run_bot`].

pub mod chain;
pub mod config;
pub mod core;
pub mod log_viewer;
pub mod runner;
pub mod telegram;

pub use core::{
    init_tracing, parse_message_id, Bot, Chat, ChatTarget, DbotError, Handler, HandlerResponse,
    Media, MediaKind, Message, MessageKind, Result, StickerRef, ToCoreMessage, ToCoreUser, User,
};

pub use chain::HandlerChain;

pub use telegram::{
    build_teloxide_bot, fetch_username, run_repl, run_webhook, TelegramBotAdapter, TelegramMessageWrapper,
    TelegramUserWrapper,
};

pub use config::BaseConfig;
pub use log_viewer::log_viewer_router;
pub use runner::run_bot;
