//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::NancyConfig;

#[derive(Parser)]
#[command(name = "nancy")]
#[command(about = "Nancy: Telegram LLM bot with movie-metadata captions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

/// Loads `.env`, then `.env.dev` overriding it. Missing files are fine.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
    dotenvy::from_filename_override(".env.dev").ok();
}

/// Load NancyConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<NancyConfig> {
    NancyConfig::load(token)
}
