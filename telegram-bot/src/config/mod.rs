//! Framework configuration: [`BaseConfig`] (Telegram + transport + log). Application config lives in the app crate.

mod base;


pub use base::{parse_flag, BaseConfig, DEFAULT_LOG_FILE, DEFAULT_PORT, WEBHOOK_PATH};
