//! Best-effort parsing of LLM output: the answer must sit in a ```` ```json ```` fence.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::types::{TechMetadata, TitleGuess};

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("static regex")
});

/// Returns the body of the first ```` ```json ```` fenced block, trimmed.
pub fn extract_json_block(text: &str) -> Option<&str> {
    JSON_FENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Strings are kept, numbers and booleans are stringified, everything else is `None`.
fn value_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses `{"movie": ..., "year": ...}` out of an LLM reply. Missing or blank title → `None`.
pub fn parse_title_guess(reply: &str) -> Option<TitleGuess> {
    let body = extract_json_block(reply)?;
    let data: Value = serde_json::from_str(body).ok()?;
    let title = value_to_string(data.get("movie"))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())?;
    let year = value_to_string(data.get("year"))
        .map(|y| y.trim().to_string())
        .filter(|y| !y.is_empty());
    Some(TitleGuess { title, year })
}

/// Parses the eight release-metadata keys. Anything unparseable yields all-`None`.
pub fn parse_technical_metadata(reply: &str) -> TechMetadata {
    let mut meta = TechMetadata::default();
    let Some(data) = extract_json_block(reply)
        .and_then(|body| serde_json::from_str::<Value>(body).ok())
    else {
        return meta;
    };
    for key in prompt::TECHNICAL_METADATA_KEYS {
        meta.set(key, value_to_string(data.get(key)));
    }
    meta
}
