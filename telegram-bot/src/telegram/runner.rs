//! Update runners: long polling (REPL) or webhook served by axum. Each update is converted to
//! core::Message and passed to the HandlerChain in a spawned task.

use crate::chain::HandlerChain;
use crate::config::BaseConfig;
use crate::core::ToCoreMessage;
use crate::log_viewer::log_viewer_router;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Builds the teloxide Bot, pointing it at a custom Bot API server when configured.
pub fn build_teloxide_bot(config: &BaseConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(&config.bot_token);
    match &config.telegram_api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url).context("Invalid TELEGRAM_API_URL")?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Converts the update and runs the chain in its own task so the dispatcher is never blocked.
fn dispatch(chain: HandlerChain, msg: teloxide::types::Message) {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        kind = core_msg.kind_label(),
        content_len = core_msg.content.chars().count(),
        "Received message"
    );

    tokio::spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}

/// The bot's username from `getMe`; `None` (and a warning) when the call fails.
pub async fn fetch_username(bot: &teloxide::Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => {
            info!(username = ?me.user.username, "Bot identity resolved");
            me.user.username
        }
        Err(e) => {
            warn!(error = %e, "getMe failed");
            None
        }
    }
}

/// Long polling until Ctrl-C.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    // Polling fails while a webhook is registered.
    if let Err(e) = bot.delete_webhook().await {
        warn!(error = %e, "deleteWebhook before polling failed");
    }
    info!("Starting long polling");

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = handler_chain.clone();
        async move {
            dispatch(chain, msg);
            respond(())
        }
    })
    .await;

    Ok(())
}

/// Registers `{WEBHOOK_HOST}/webhook`, serves it plus the log viewer on `0.0.0.0:{PORT}`,
/// and runs until Ctrl-C. The webhook is deleted on shutdown only when `WEBHOOK_REMOVABLE` is set.
#[instrument(skip(bot, handler_chain, config))]
pub async fn run_webhook(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    config: &BaseConfig,
) -> Result<()> {
    let url = config
        .webhook_url()
        .context("WEBHOOK_HOST not set")?
        .parse::<reqwest::Url>()
        .context("Invalid WEBHOOK_HOST")?;
    let address = SocketAddr::from(([0, 0, 0, 0], config.port));

    let (listener, stop_flag, webhook_router) =
        webhooks::axum_no_setup(webhooks::Options::new(address, url.clone()));
    bot.set_webhook(url.clone())
        .await
        .context("setWebhook failed")?;
    info!(url = %url, address = %address, "Webhook registered");

    let app = webhook_router.merge(log_viewer_router(config.log_file.clone()));
    let tcp = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    let server = tokio::spawn(async move {
        axum::serve(tcp, app)
            .with_graceful_shutdown(stop_flag)
            .await
    });

    teloxide::repl_with_listener(
        bot.clone(),
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = handler_chain.clone();
            async move {
                dispatch(chain, msg);
                respond(())
            }
        },
        listener,
    )
    .await;

    if config.webhook_removable {
        match bot.delete_webhook().await {
            Ok(_) => info!("Webhook deleted"),
            Err(e) => warn!(error = %e, "deleteWebhook failed"),
        }
    }

    server
        .await
        .context("Webhook server task panicked")?
        .context("Webhook server failed")?;
    Ok(())
}
