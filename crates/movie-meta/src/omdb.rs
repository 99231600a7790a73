//! OMDb lookup with retry on transient HTTP statuses.

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::error::MovieError;
use crate::types::MovieDetails;

/// Public OMDb endpoint.
pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

const USER_AGENT: &str = "nancyai/2.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Retries after the first attempt and the initial backoff (doubled per retry).
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    fn delay(&self, retry_index: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << retry_index.min(16))
    }
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(flatten)]
    details: MovieDetails,
}

/// OMDb client. Cheap to clone.
#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Result<Self, MovieError> {
        Self::with_base_url(api_key, OMDB_BASE_URL.to_string())
    }

    /// Client against a custom endpoint (tests, mirrors).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, MovieError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Looks up a movie by title and optional year.
    ///
    /// When OMDb answers `Response: "False"` for a title+year query, the title is retried
    /// once without the year. Transport and decode errors are logged and yield `None`.
    #[instrument(skip(self))]
    pub async fn movie_details(&self, title: &str, year: Option<&str>) -> Option<MovieDetails> {
        if title.trim().is_empty() {
            return None;
        }
        let mut year = year.filter(|y| !y.trim().is_empty());
        loop {
            let response = match self.fetch(title, year).await {
                Ok(r) => r,
                Err(e) => {
                    error!(error = %e, title = %title, "OMDb API error");
                    return None;
                }
            };
            if response.response.as_deref() == Some("True") {
                let mut details = response.details;
                details.lookup_status = "ok".to_string();
                info!(title = ?details.title, year = ?details.year, "OMDb lookup ok");
                return Some(details);
            }
            debug!(title = %title, year = ?year, error = ?response.error, "OMDb found nothing");
            if year.take().is_none() {
                return None;
            }
        }
    }

    async fn fetch(&self, title: &str, year: Option<&str>) -> Result<OmdbResponse, MovieError> {
        let mut params: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str()), ("t", title)];
        if let Some(y) = year {
            params.push(("y", y));
        }

        let mut retry_index = 0;
        loop {
            let result = self.http.get(&self.base_url).query(&params).send().await;
            let retryable = match &result {
                Ok(resp) => RETRY_STATUSES.contains(&resp.status()),
                Err(e) => e.is_connect() || e.is_timeout(),
            };
            if retryable && retry_index < self.retry.max_retries {
                let delay = self.retry.delay(retry_index);
                warn!(attempt = retry_index + 1, delay_ms = delay.as_millis() as u64, "OMDb request failed, retrying");
                sleep(delay).await;
                retry_index += 1;
                continue;
            }

            let resp = result?;
            if !resp.status().is_success() {
                return Err(MovieError::Status(resp.status()));
            }
            return Ok(resp.json::<OmdbResponse>().await?);
        }
    }
}
