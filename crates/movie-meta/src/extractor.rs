//! LLM extraction of title/year and release metadata, chained with the OMDb lookup.

use llm_client::{CompletionOptions, LlmClient};
use prompt::ChatMessage;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::MovieError;
use crate::omdb::OmdbClient;
use crate::parse::{parse_technical_metadata, parse_title_guess};
use crate::types::{MovieDetails, TechMetadata, TitleGuess};

/// Movie pipeline: one extraction model plus an OMDb client.
#[derive(Clone)]
pub struct MovieExtractor {
    llm_client: Arc<dyn LlmClient>,
    model: String,
    omdb: OmdbClient,
}

impl MovieExtractor {
    pub fn new(llm_client: Arc<dyn LlmClient>, model: impl Into<String>, omdb: OmdbClient) -> Self {
        Self {
            llm_client,
            model: model.into(),
            omdb,
        }
    }

    async fn ask(&self, prompt: String) -> Result<String, MovieError> {
        let reply = self
            .llm_client
            .get_llm_response_with_messages(
                &self.model,
                vec![ChatMessage::user(prompt)],
                CompletionOptions::EXTRACTION,
            )
            .await?;
        Ok(reply)
    }

    /// Asks the LLM for `{movie, year}`. `Ok(None)` when the reply has no usable title.
    #[instrument(skip(self))]
    pub async fn extract_title(&self, text: &str) -> Result<Option<TitleGuess>, MovieError> {
        let reply = self.ask(prompt::movie_title_prompt(text)).await?;
        let guess = parse_title_guess(&reply);
        info!(guess = ?guess, "Extracted movie title");
        Ok(guess)
    }

    /// Extracts a title from `"{filename} {caption}"` and looks it up on OMDb.
    #[instrument(skip(self))]
    pub async fn process(
        &self,
        filename: &str,
        caption: &str,
    ) -> Result<Option<MovieDetails>, MovieError> {
        let text = format!("{} {}", filename, caption);
        let Some(guess) = self.extract_title(&text).await? else {
            warn!(filename = %filename, "Could not extract movie name");
            return Ok(None);
        };
        Ok(self
            .omdb
            .movie_details(&guess.title, guess.year.as_deref())
            .await)
    }

    /// Asks the LLM for size, duration, audio, quality, HD, subtitles, video and audio details.
    #[instrument(skip(self))]
    pub async fn extract_technical_metadata(&self, text: &str) -> Result<TechMetadata, MovieError> {
        let reply = self.ask(prompt::technical_metadata_prompt(text)).await?;
        Ok(parse_technical_metadata(&reply))
    }
}
