//! **Public entry points of this crate.**

use anyhow::Result;
use std::sync::Arc;
use telegram_bot::{Bot, HandlerChain};

use crate::assembly;
use crate::config::NancyConfig;

/// Runs Nancy: polling, or webhook when `WEBHOOK_HOST` is set. Load config with [`crate::load_config`] first.
pub async fn run_nancy(config: NancyConfig) -> Result<()> {
    config.validate()?;
    let base = config.base().clone();
    telegram_bot::run_bot(base, move |_base, bot| {
        let components = assembly::build_components(&config)?;
        Ok(assembly::build_handler_chain(&config, &components, bot))
    })
    .await
}

/// Builds the same handler chain as [`run_nancy`] without starting a transport. `bot` is
/// usually a mock in tests.
pub fn build_nancy_chain(config: &NancyConfig, bot: Arc<dyn Bot>) -> Result<HandlerChain> {
    let components = assembly::build_components(config)?;
    Ok(assembly::build_handler_chain(config, &components, bot))
}
