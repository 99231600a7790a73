//! Slash commands: /start, /clear, /status, /log, /model, /help.

use async_trait::async_trait;
use movie_meta::format::html_escape;
use std::sync::Arc;
use telegram_bot::{Bot, Handler, HandlerResponse, Message, MessageKind, Result};
use tracing::{debug, info, instrument};

use crate::reply::ReplyGenerator;

use super::MSG_AI_NOT_READY;

pub const HELP_TEXT: &str = "Available commands: /start, /clear, /status, /model, /log, /help";

/// A slash command split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    pub name: &'a str,
    /// Bot username after `@`, as in `/start@NancyBot`.
    pub addressee: Option<&'a str>,
    pub args: &'a str,
}

impl Command<'_> {
    /// True unless the command names another bot. Without a known own username every
    /// command is accepted.
    pub fn is_for(&self, own_username: Option<&str>) -> bool {
        match (self.addressee, own_username) {
            (Some(addressee), Some(own)) => {
                addressee.eq_ignore_ascii_case(own.trim_start_matches('@'))
            }
            _ => true,
        }
    }
}

/// Splits `"/model@NancyBot llama"` into name `model`, addressee `NancyBot` and args `llama`.
/// `None` for non-commands.
pub fn parse_command(text: &str) -> Option<Command<'_>> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let (name, addressee) = match head.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee).filter(|a| !a.is_empty())),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(Command {
        name,
        addressee,
        args,
    })
}

/// Answers the known commands; anything else continues down the chain.
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    replies: Option<Arc<ReplyGenerator>>,
    webhook_host: Option<String>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        replies: Option<Arc<ReplyGenerator>>,
        webhook_host: Option<String>,
    ) -> Self {
        Self {
            bot,
            replies,
            webhook_host,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn start(&self, message: &Message) -> Result<HandlerResponse> {
        let text = format!(
            "Hello, <b>{}</b>! Send media or text.",
            html_escape(&message.user.display_name())
        );
        self.bot.send_html(&message.chat, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn model(&self, message: &Message, replies: &ReplyGenerator, args: &str) -> String {
        let models = replies.models();
        let chat_id = message.chat.id;
        match args {
            "" => format!(
                "Current model: {}\nAvailable models: {}\nUse /model <name> to switch or /model reset for the default.",
                models.current(chat_id).await,
                models.available().join(", ")
            ),
            "reset" => {
                models.reset(chat_id).await;
                format!("Model reset to {}.", models.default_model())
            }
            name => match models.select(chat_id, name).await {
                Ok(()) => {
                    info!(chat_id, model = %name, "Chat model selected");
                    format!("Model set to {}.", name)
                }
                Err(e) => e.to_string(),
            },
        }
    }

    fn log_link(&self) -> String {
        match &self.webhook_host {
            Some(host) => format!("Log Link: {}/", host),
            None => "Log viewer is only available in webhook mode.".to_string(),
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text {
            return Ok(HandlerResponse::Continue);
        }
        let Some(command) = parse_command(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };
        if !command.is_for(self.bot.username()) {
            debug!(addressee = ?command.addressee, "Command addressed to another bot");
            return Ok(HandlerResponse::Continue);
        }
        let (name, args) = (command.name, command.args);

        let user_id = message.user.id;
        match (name, self.replies.as_deref()) {
            ("start", _) => self.start(message).await,
            ("help", _) => self.reply(message, HELP_TEXT.to_string()).await,
            ("log", _) => self.reply(message, self.log_link()).await,
            ("clear" | "status" | "model", None) => {
                self.reply(message, MSG_AI_NOT_READY.to_string()).await
            }
            ("clear", Some(replies)) => {
                replies.clear_history(user_id).await;
                info!(user_id, "Conversation memory cleared");
                self.reply(message, "Conversation memory cleared.".to_string())
                    .await
            }
            ("status", Some(replies)) => {
                let text = format!(
                    "Messages in Memory: {} of {}",
                    replies.history_length(user_id).await,
                    replies.history_capacity()
                );
                self.reply(message, text).await
            }
            ("model", Some(replies)) => {
                let text = self.model(message, replies, args).await;
                self.reply(message, text).await
            }
            _ => Ok(HandlerResponse::Continue),
        }
    }
}
