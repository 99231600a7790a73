use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::chain::HandlerChain;
use crate::config::BaseConfig;
use crate::core::{init_tracing, Bot};
use crate::telegram::{
    build_teloxide_bot, fetch_username, run_repl, run_webhook, TelegramBotAdapter,
};

/// Main entry: validate config, init logging, build the bot, build the chain via `make_chain`,
/// then run long polling or, when `WEBHOOK_HOST` is set, the webhook server.
///
/// `make_chain` receives the config and the [`Bot`] handlers should send through.
#[instrument(skip(config, make_chain))]
pub async fn run_bot<F>(config: BaseConfig, make_chain: F) -> Result<()>
where
    F: FnOnce(&BaseConfig, Arc<dyn Bot>) -> Result<HandlerChain>,
{
    config.validate()?;
    init_tracing(&config.log_file)?;

    let teloxide_bot = build_teloxide_bot(&config)?;
    let username = fetch_username(&teloxide_bot).await;
    let bot: Arc<dyn Bot> =
        Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()).with_username(username));
    let handler_chain = make_chain(&config, bot)?;

    info!(
        handlers = handler_chain.len(),
        webhook = config.webhook_host.is_some(),
        log_file = %config.log_file,
        "Bot started successfully"
    );

    match config.webhook_host {
        Some(_) => run_webhook(teloxide_bot, handler_chain, &config).await,
        None => run_repl(teloxide_bot, handler_chain).await,
    }
}
