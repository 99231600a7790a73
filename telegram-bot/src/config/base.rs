//! Base config: Telegram connection, transport, logging. Loaded from env.

use std::env;
use tracing::warn;

use crate::core::{ChatTarget, DbotError, Result};

pub const DEFAULT_LOG_FILE: &str = "bot.log";
pub const DEFAULT_PORT: u16 = 8000;
/// Path the webhook is served on, appended to `WEBHOOK_HOST`.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Base config: Telegram-related, transport and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// BOT_LOG_FILE
    pub log_file: String,
    /// WEBHOOK_HOST without trailing `/`; `None` means long polling
    pub webhook_host: Option<String>,
    /// WEBHOOK_REMOVABLE: delete the webhook on shutdown
    pub webhook_removable: bool,
    /// PORT for the webhook server
    pub port: u16,
    /// LOG_CHANNEL_ID: where original media is archived
    pub log_channel: Option<ChatTarget>,
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// `1`, `true`, `yes`, `y` (any case) are true.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| non_empty("BOT_TOKEN"))
            .ok_or_else(|| DbotError::Config("BOT_TOKEN not set".to_string()))?;
        let telegram_api_url = non_empty("TELEGRAM_API_URL").or_else(|| non_empty("TELOXIDE_API_URL"));
        let log_file = non_empty("BOT_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let webhook_host =
            non_empty("WEBHOOK_HOST").map(|h| h.trim_end_matches('/').to_string());
        let webhook_removable = non_empty("WEBHOOK_REMOVABLE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| DbotError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };
        let log_channel = non_empty("LOG_CHANNEL_ID").and_then(|raw| {
            let target = ChatTarget::parse(&raw);
            if target.is_none() {
                warn!(value = %raw, "Invalid LOG_CHANNEL_ID; expected @username or numeric id, log channel disabled");
            }
            target
        });

        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            webhook_host,
            webhook_removable,
            port,
            log_channel,
        })
    }

    /// Validate config: Telegram API URL and webhook host must be URLs when set.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                return Err(DbotError::Config(format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                )));
            }
        }
        if let Some(ref host) = self.webhook_host {
            if reqwest::Url::parse(host).is_err() {
                return Err(DbotError::Config(format!(
                    "WEBHOOK_HOST is set but not a valid URL: {}",
                    host
                )));
            }
        }
        Ok(())
    }

    /// `{WEBHOOK_HOST}/webhook` when webhook mode is configured.
    pub fn webhook_url(&self) -> Option<String> {
        self.webhook_host
            .as_ref()
            .map(|host| format!("{}{}", host, WEBHOOK_PATH))
    }
}
