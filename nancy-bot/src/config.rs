//! NancyConfig: BaseConfig (Telegram + transport + log) + LLM config + OMDb settings. Loaded from env.

use anyhow::Result;
use llm_client::{EnvLlmConfig, LlmConfig};
use std::env;
use telegram_bot::BaseConfig;

pub struct NancyConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    /// OMDB_API_KEY; `None` disables the movie extractor.
    pub omdb_api_key: Option<String>,
    /// OMDB_BASE_URL
    pub omdb_base_url: String,
}

impl NancyConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let omdb_api_key = env::var("OMDB_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let omdb_base_url = env::var("OMDB_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| movie_meta::OMDB_BASE_URL.to_string());
        Ok(Self {
            base,
            llm,
            omdb_api_key,
            omdb_base_url,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if reqwest::Url::parse(&self.omdb_base_url).is_err() {
            anyhow::bail!("OMDB_BASE_URL is not a valid URL: {}", self.omdb_base_url);
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn llm(&self) -> &dyn LlmConfig {
        &self.llm
    }
}
