//! Per-chat chat-model selection.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelSelectionError {
    #[error("Unknown model: {requested}. Available: {available}")]
    UnknownModel { requested: String, available: String },
}

/// Selected model per chat id; chats without a selection use the default.
#[derive(Debug, Clone)]
pub struct ModelSelection {
    default_model: String,
    available: Vec<String>,
    selected: Arc<RwLock<HashMap<i64, String>>>,
}

impl ModelSelection {
    /// The default model is always allowed, listed first.
    pub fn new(default_model: impl Into<String>, available: impl IntoIterator<Item = String>) -> Self {
        let default_model = default_model.into();
        let mut models = vec![default_model.clone()];
        for model in available {
            if !models.contains(&model) {
                models.push(model);
            }
        }
        Self {
            default_model,
            available: models,
            selected: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub async fn current(&self, chat_id: i64) -> String {
        self.selected
            .read()
            .await
            .get(&chat_id)
            .cloned()
            .unwrap_or_else(|| self.default_model.clone())
    }

    /// Rejects models outside [`ModelSelection::available`], leaving the selection unchanged.
    pub async fn select(&self, chat_id: i64, model: &str) -> Result<(), ModelSelectionError> {
        let model = model.trim();
        if !self.available.iter().any(|m| m == model) {
            return Err(ModelSelectionError::UnknownModel {
                requested: model.to_string(),
                available: self.available.join(", "),
            });
        }
        self.selected
            .write()
            .await
            .insert(chat_id, model.to_string());
        Ok(())
    }

    pub async fn reset(&self, chat_id: i64) {
        self.selected.write().await.remove(&chat_id);
    }
}
