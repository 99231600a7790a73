//! Groq implementation of [`LlmClient`]: wraps openai-client pointed at Groq's OpenAI-compatible API.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionParams;
use prompt::ChatMessage;
use std::time::Duration;
use tracing::instrument;

use super::{chat_message_to_openai, CompletionOptions, LlmClient};

/// LlmClient backed by [`openai_client::OpenAIClient`].
#[derive(Clone)]
pub struct GroqLlmClient {
    client: openai_client::OpenAIClient,
}

impl GroqLlmClient {
    /// Client against `base_url` (normally [`openai_client::GROQ_BASE_URL`]).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
        }
    }

    /// Client whose requests time out after `timeout`.
    pub fn with_timeout(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: openai_client::OpenAIClient::with_base_url_and_timeout(
                api_key, base_url, timeout,
            )?,
        })
    }
}

#[async_trait]
impl LlmClient for GroqLlmClient {
    #[instrument(skip(self, messages), fields(message_count = messages.len()))]
    async fn get_llm_response_with_messages(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String> {
        let openai_messages = messages
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>>>()?;
        self.client
            .chat_completion(
                model,
                openai_messages,
                CompletionParams {
                    max_tokens: options.max_tokens,
                    temperature: options.temperature,
                },
            )
            .await
    }
}
