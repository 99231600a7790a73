//! # Movie metadata pipeline
//!
//! Turns a media file name + caption into an HTML caption for Telegram:
//!
//! 1. [`MovieExtractor::extract_title`]: LLM free text → `{movie, year}` (fenced JSON).
//! 2. [`OmdbClient::movie_details`]: title/year → [`MovieDetails`], retrying without the year.
//! 3. [`MovieExtractor::extract_technical_metadata`]: LLM → size/quality/codec fields.
//! 4. [`format`] and [`caption::MediaCaption`]: emoji template, sender link, length limits.
//!
//! ## External interactions
//!
//! - **LLM**: any [`llm_client::LlmClient`] (Groq in production).
//! - **OMDb**: `GET https://www.omdbapi.com/?apikey=..&t=..&y=..`.

pub mod caption;
mod error;
mod extractor;
pub mod format;
mod omdb;
mod parse;
mod types;

pub use caption::{MediaCaption, Sender, CAPTION_LIMIT};
pub use error::MovieError;
pub use extractor::MovieExtractor;
pub use omdb::{OmdbClient, RetryPolicy, OMDB_BASE_URL};
pub use parse::{extract_json_block, parse_technical_metadata, parse_title_guess};
pub use types::{MovieDetails, TechMetadata, TitleGuess};
