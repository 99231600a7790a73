//! # nancy_bot
//!
//! Nancy: relays chat to Groq, reposts media with OMDb movie details, echoes stickers.
//! **Public API:** see [facade] for `run_nancy` and `build_nancy_chain`.

mod assembly;
pub mod cli;
pub mod config;
mod facade;
pub mod handlers;
pub mod memory;
pub mod reply;
pub mod vision;

pub use assembly::{build_components, build_handler_chain, NancyComponents};
pub use cli::{load_config, load_dotenv, Cli, Commands};
pub use config::NancyConfig;
pub use facade::*;
pub use memory::{ConversationStore, ModelSelection, ModelSelectionError, Turn, MAX_TURNS};
pub use reply::ReplyGenerator;
pub use vision::ImageAnalyzer;
