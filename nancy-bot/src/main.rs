//! nancy: entry point. Loads `.env`/`.env.dev`, parses the CLI and runs the bot.

use anyhow::Result;
use clap::Parser;
use nancy_bot::{load_config, load_dotenv, run_nancy, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_nancy(config).await
        }
    }
}
