//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and a Groq implementation. Transport-agnostic;
//! used by the reply generator, the image analyzer and the movie extractor.
//!
//! The trait takes the model per call so one client can serve per-chat model selection.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod groq_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use groq_llm::GroqLlmClient;

/// Sampling options for a single completion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    /// Chat replies: `max_tokens = 256`, `temperature = 0.7`.
    pub const CHAT: Self = Self {
        max_tokens: Some(256),
        temperature: Some(0.7),
    };

    /// Image analysis: `max_tokens = 512`, `temperature = 0.7`.
    pub const VISION: Self = Self {
        max_tokens: Some(512),
        temperature: Some(0.7),
    };

    /// Deterministic extraction: `temperature = 0`, server default length.
    pub const EXTRACTION: Self = Self {
        max_tokens: None,
        temperature: Some(0.0),
    };
}

/// LLM client interface: request a completion for a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply text for the given messages (system/user/assistant).
    async fn get_llm_response_with_messages(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
/// A User message with `image_url` becomes a two-part (text + image) content array.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => match msg.image_url.as_deref() {
            Some(url) => {
                let parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
                    ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(content)
                        .build()?
                        .into(),
                    ChatCompletionRequestMessageContentPartImageArgs::default()
                        .image_url(ImageUrlArgs::default().url(url).build()?)
                        .build()?
                        .into(),
                ];
                ChatCompletionRequestUserMessageArgs::default()
                    .content(parts)
                    .build()?
                    .into()
            }
            None => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()?
                .into(),
        },
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}
