use thiserror::Error;

/// Errors of the movie pipeline. OMDb failures are absorbed by [`crate::OmdbClient`]; only
/// LLM and client-construction failures reach callers.
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("LLM error: {0}")]
    Llm(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OMDb returned status {0}")]
    Status(reqwest::StatusCode),
}
