//! Telegram transport: adapters, Bot implementation, polling and webhook runners.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::{build_teloxide_bot, fetch_username, run_repl, run_webhook};
