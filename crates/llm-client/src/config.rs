//! LLM configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Default chat model (fast, cheap).
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.1-8b-instant";

/// Default model for title/metadata extraction.
pub const DEFAULT_MOVIE_MODEL: &str = "llama-3.3-70b-versatile";

/// LLM configuration interface for the Groq endpoint.
pub trait LlmConfig: Send + Sync {
    /// `None` disables every LLM-backed feature.
    fn api_key(&self) -> Option<&str>;
    fn base_url(&self) -> &str;
    fn chat_model(&self) -> &str;
    /// Models users may pick with `/model`; always contains [`LlmConfig::chat_model`].
    fn chat_models(&self) -> &[String];
    fn movie_model(&self) -> &str;
    /// `None` disables image analysis.
    fn vision_model(&self) -> Option<&str>;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub chat_model: String,
    pub chat_models: Vec<String>,
    pub movie_model: String,
    pub vision_model: Option<String>,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> Option<&str> {
        self.groq_api_key.as_deref()
    }
    fn base_url(&self) -> &str {
        &self.groq_base_url
    }
    fn chat_model(&self) -> &str {
        &self.chat_model
    }
    fn chat_models(&self) -> &[String] {
        &self.chat_models
    }
    fn movie_model(&self) -> &str {
        &self.movie_model
    }
    fn vision_model(&self) -> Option<&str> {
        self.vision_model.as_deref()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Splits a comma-separated model list, dropping blanks and duplicates, and puts `default` first.
pub fn parse_model_list(raw: Option<&str>, default: &str) -> Vec<String> {
    let mut models = vec![default.to_string()];
    for m in raw.unwrap_or_default().split(',').map(str::trim) {
        if !m.is_empty() && !models.iter().any(|x| x == m) {
            models.push(m.to_string());
        }
    }
    models
}

impl EnvLlmConfig {
    /// Load from environment variables: GROQ_API_KEY, GROQ_BASE_URL, CHAT_AI_MODEL, CHAT_MODELS,
    /// MOVIE_AI_MODEL, VISION_AI_MODEL. A missing API key is not an error.
    pub fn from_env() -> Result<Self> {
        let groq_api_key = non_empty_var("GROQ_API_KEY");
        let groq_base_url = non_empty_var("GROQ_BASE_URL")
            .unwrap_or_else(|| openai_client::GROQ_BASE_URL.to_string());
        let chat_model =
            non_empty_var("CHAT_AI_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());
        let chat_models = parse_model_list(non_empty_var("CHAT_MODELS").as_deref(), &chat_model);
        let movie_model =
            non_empty_var("MOVIE_AI_MODEL").unwrap_or_else(|| DEFAULT_MOVIE_MODEL.to_string());
        let vision_model = non_empty_var("VISION_AI_MODEL");
        Ok(Self {
            groq_api_key,
            groq_base_url,
            chat_model,
            chat_models,
            movie_model,
            vision_model,
        })
    }
}
