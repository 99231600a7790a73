//! Assembly: builds the LLM-backed components from config and wires the handler chain.

use anyhow::Result;
use llm_client::{GroqLlmClient, LlmClient, LlmConfig};
use movie_meta::{MovieExtractor, OmdbClient};
use std::sync::Arc;
use std::time::Duration;
use telegram_bot::{Bot, HandlerChain};
use tracing::{info, warn};

use crate::config::NancyConfig;
use crate::handlers::{ChatHandler, CommandHandler, MediaHandler, StickerHandler, VisionHandler};
use crate::memory::{ConversationStore, ModelSelection};
use crate::reply::ReplyGenerator;
use crate::vision::ImageAnalyzer;

/// Client timeout for title and metadata extraction requests.
const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(20);

/// Optional collaborators; each is `None` when its keys are missing.
#[derive(Clone, Default)]
pub struct NancyComponents {
    pub replies: Option<Arc<ReplyGenerator>>,
    pub analyzer: Option<Arc<ImageAnalyzer>>,
    pub extractor: Option<Arc<MovieExtractor>>,
}

/// Builds the components from config: GROQ_API_KEY enables chat (and vision with
/// VISION_AI_MODEL); GROQ_API_KEY plus OMDB_API_KEY enable the movie extractor.
pub fn build_components(config: &NancyConfig) -> Result<NancyComponents> {
    let llm_cfg = config.llm();
    let Some(api_key) = llm_cfg.api_key() else {
        warn!("GROQ_API_KEY not set; chat, vision and movie features disabled");
        return Ok(NancyComponents::default());
    };

    let chat_client: Arc<dyn LlmClient> = Arc::new(GroqLlmClient::with_base_url(
        api_key.to_string(),
        llm_cfg.base_url().to_string(),
    ));

    let models = ModelSelection::new(llm_cfg.chat_model(), llm_cfg.chat_models().to_vec());
    info!(
        default_model = %models.default_model(),
        available = ?models.available(),
        "Chat models configured"
    );
    let replies = Arc::new(ReplyGenerator::new(
        chat_client.clone(),
        ConversationStore::new(),
        models,
    ));

    let analyzer = llm_cfg.vision_model().map(|model| {
        info!(model = %model, "Image analysis enabled");
        Arc::new(ImageAnalyzer::new(chat_client.clone(), model))
    });

    let extractor = match &config.omdb_api_key {
        Some(omdb_key) => {
            let extraction_client: Arc<dyn LlmClient> = Arc::new(GroqLlmClient::with_timeout(
                api_key.to_string(),
                llm_cfg.base_url().to_string(),
                EXTRACTION_TIMEOUT,
            )?);
            let omdb = OmdbClient::with_base_url(omdb_key.clone(), config.omdb_base_url.clone())?;
            info!(model = %llm_cfg.movie_model(), "Movie extractor enabled");
            Some(Arc::new(MovieExtractor::new(
                extraction_client,
                llm_cfg.movie_model(),
                omdb,
            )))
        }
        None => {
            warn!("OMDB_API_KEY not set; media captions will not include movie details");
            None
        }
    };

    Ok(NancyComponents {
        replies: Some(replies),
        analyzer,
        extractor,
    })
}

/// Chain order: commands → sticker → vision (only with an analyzer) → media → chat.
pub fn build_handler_chain(
    config: &NancyConfig,
    components: &NancyComponents,
    bot: Arc<dyn Bot>,
) -> HandlerChain {
    let mut chain = HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            bot.clone(),
            components.replies.clone(),
            config.base().webhook_host.clone(),
        )))
        .add_handler(Arc::new(StickerHandler::new(bot.clone())));

    if let Some(analyzer) = &components.analyzer {
        chain = chain.add_handler(Arc::new(VisionHandler::new(bot.clone(), analyzer.clone())));
    }

    chain
        .add_handler(Arc::new(MediaHandler::new(
            bot.clone(),
            components.extractor.clone(),
            config.base().log_channel.clone(),
        )))
        .add_handler(Arc::new(ChatHandler::new(bot, components.replies.clone())))
}
