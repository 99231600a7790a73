//! Conversational replies: persona + history + new input → chat model → history.

use anyhow::Result;
use llm_client::{CompletionOptions, LlmClient};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::memory::{ConversationStore, ModelSelection};

/// Generates chat replies and owns the conversation state they depend on.
pub struct ReplyGenerator {
    llm_client: Arc<dyn LlmClient>,
    conversations: ConversationStore,
    models: ModelSelection,
}

impl ReplyGenerator {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        conversations: ConversationStore,
        models: ModelSelection,
    ) -> Self {
        Self {
            llm_client,
            conversations,
            models,
        }
    }

    pub fn models(&self) -> &ModelSelection {
        &self.models
    }

    /// Asks the chat's selected model for a reply to `text`, given the user's history.
    ///
    /// The trimmed reply is stored as a new turn only when the completion succeeds and is not blank.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn generate_reply(
        &self,
        user_id: i64,
        chat_id: i64,
        user_name: &str,
        text: &str,
    ) -> Result<String> {
        let history = self.conversations.history(user_id).await;
        let messages = prompt::conversation_messages(
            user_name,
            history.iter().map(|t| (t.input.as_str(), t.output.as_str())),
            text,
        );
        let model = self.models.current(chat_id).await;
        debug!(model = %model, history_turns = history.len(), "Requesting chat completion");

        let reply = self
            .llm_client
            .get_llm_response_with_messages(&model, messages, CompletionOptions::CHAT)
            .await?;
        let reply = reply.trim().to_string();
        if reply.is_empty() {
            anyhow::bail!("Model {} returned an empty reply", model);
        }

        self.conversations.push(user_id, text, reply.clone()).await;
        info!(model = %model, reply_len = reply.len(), "Reply generated");
        Ok(reply)
    }

    pub async fn clear_history(&self, user_id: i64) {
        self.conversations.clear(user_id).await;
    }

    pub async fn history_length(&self, user_id: i64) -> usize {
        self.conversations.len(user_id).await
    }

    pub fn history_capacity(&self) -> usize {
        self.conversations.capacity()
    }
}
