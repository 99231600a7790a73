//! # OpenAI-compatible API client
//!
//! Thin wrapper around [async-openai] for chat completion against any OpenAI-compatible
//! endpoint. Nancy points it at Groq (`https://api.groq.com/openai/v1`).
//! Provides token masking for safe logging and a simple request/response API.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;
use std::time::Duration;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs, ChatCompletionRequestMessageContentPartTextArgs,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};

/// Groq's OpenAI-compatible base URL.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Sampling parameters sent with a completion request. `None` leaves the server default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Chat client against one OpenAI-compatible endpoint. The API key is kept only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
}

fn endpoint_config(api_key: &str, base_url: String) -> OpenAIConfig {
    OpenAIConfig::new()
        .with_api_key(api_key)
        .with_api_base(base_url)
}

impl OpenAIClient {
    /// Builds a client for the given base URL (e.g. [`GROQ_BASE_URL`]).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::with_config(endpoint_config(&api_key, base_url))),
            api_key_for_logging: api_key,
        }
    }

    /// Same as [`Self::with_base_url`] but every HTTP request is bounded by `timeout`.
    pub fn with_base_url_and_timeout(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let client = Client::with_config(endpoint_config(&api_key, base_url)).with_http_client(http);
        Ok(Self {
            client: Arc::new(client),
            api_key_for_logging: api_key,
        })
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Logs masked API key and token usage. The request JSON (history, inline images) is only logged at trace level.
    #[allow(deprecated)]
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
        params: CompletionParams,
    ) -> anyhow::Result<String> {
        let masked = mask_token(&self.api_key_for_logging);

        tracing::info!(
            model = %model,
            message_count = messages.len(),
            max_tokens = ?params.max_tokens,
            temperature = ?params.temperature,
            api_key = %masked,
            "chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if let Some(max_tokens) = params.max_tokens {
            args.max_tokens(max_tokens);
        }
        if let Some(temperature) = params.temperature {
            args.temperature(temperature);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::trace!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in completion response"),
        }
    }
}
