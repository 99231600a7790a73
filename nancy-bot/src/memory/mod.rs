//! In-process state: conversation history per user and model selection per chat. Lost on restart.

mod conversation;
mod model_selection;

pub use conversation::{ConversationStore, Turn, MAX_TURNS};
pub use model_selection::{ModelSelection, ModelSelectionError};
