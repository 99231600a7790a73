//! Image analysis with a vision model. Results are not stored in conversation history.

use anyhow::Result;
use base64::Engine;
use llm_client::{CompletionOptions, LlmClient};
use std::sync::Arc;
use tracing::{info, instrument};

/// `data:image/jpeg;base64,...` URL for inline image upload.
pub fn jpeg_data_url(image: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(image)
    )
}

pub struct ImageAnalyzer {
    llm_client: Arc<dyn LlmClient>,
    model: String,
}

impl ImageAnalyzer {
    pub fn new(llm_client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            llm_client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Describes `image`, answering `question` (the photo caption) when given.
    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn analyze(&self, user_name: &str, image: &[u8], question: Option<&str>) -> Result<String> {
        let messages = prompt::image_messages(user_name, question, &jpeg_data_url(image));
        let reply = self
            .llm_client
            .get_llm_response_with_messages(&self.model, messages, CompletionOptions::VISION)
            .await?;
        info!(model = %self.model, reply_len = reply.len(), "Image analyzed");
        Ok(reply.trim().to_string())
    }
}
