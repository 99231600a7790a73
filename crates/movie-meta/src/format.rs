//! HTML display templates for movie details and release metadata (Telegram HTML parse mode).

use crate::types::{MovieDetails, TechMetadata};

/// Heading above the OMDb block.
pub const MOVIE_HEADING: &str = "Nancy Generated ↓";
/// Heading above the release metadata block inside a media caption.
pub const METADATA_HEADING: &str = "Metadata:";

/// Escapes `&`, `<`, `>` for Telegram HTML.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// `"142 min"` → `"2h 22m"`. Non-runtime strings and non-positive values yield `None`;
/// an unparsable number keeps the raw text.
pub fn format_duration(runtime: &str) -> Option<String> {
    if !runtime.contains("min") {
        return None;
    }
    let minutes: i64 = match runtime.replace(" min", "").trim().parse() {
        Ok(m) => m,
        Err(_) => return Some(runtime.to_string()),
    };
    if minutes <= 0 {
        return None;
    }
    let (hours, mins) = (minutes / 60, minutes % 60);
    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 {
        parts.push(format!("{}m", mins));
    }
    Some(parts.join(" "))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn certificate(rated: &str) -> String {
    if rated.contains("13") {
        format!("{} ⑬", rated)
    } else if rated.contains("16") || rated.contains("17") || rated.contains('R') {
        format!("{} 🔞", rated)
    } else {
        rated.to_string()
    }
}

fn block(heading: &str, lines: &[String]) -> String {
    format!("<b>{}</b>\n<blockquote>{}</blockquote>", heading, lines.join("\n"))
}

/// Renders the OMDb record as heading + blockquote. `None` when no field is printable.
pub fn format_movie_details(details: &MovieDetails, heading: &str) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(title) = present(&details.title) {
        let full = match present(&details.year) {
            Some(year) => format!("{} ({})", title, year),
            None => title.to_string(),
        };
        lines.push(format!("🎥 <b>Title : {}</b>", html_escape(&full)));
    }
    if let Some(duration) = details.runtime.as_deref().and_then(format_duration) {
        lines.push(format!("⌚️ <b>Duration :</b> {}", html_escape(&duration)));
    }
    if let Some(genre) = present(&details.genre) {
        lines.push(format!("🎻 <b>Genre :</b> {}", html_escape(genre)));
    }
    if let Some(rated) = present(&details.rated).filter(|r| *r != "N/A") {
        lines.push(format!(
            "📝 <b>Certificate :</b> {}",
            html_escape(&certificate(rated))
        ));
    }
    if let Some(director) = present(&details.director) {
        lines.push(format!("🎬 <b>Director :</b> {}", html_escape(director)));
    }
    if let Some(actors) = present(&details.actors) {
        lines.push(format!("👨🏻‍🎤 <b>Actors :</b> {}", html_escape(actors)));
    }
    if let Some(plot) = present(&details.plot) {
        lines.push(format!("🧨 <b>Plot :</b> {}", html_escape(plot)));
    }
    if let Some(rating) = present(&details.imdb_rating).filter(|r| *r != "N/A") {
        lines.push(format!("⭐️ <b>IMDB :</b> {} / 10", html_escape(rating)));
    }

    if lines.is_empty() {
        None
    } else {
        Some(block(heading, &lines))
    }
}

fn normalize_hd(value: &str) -> String {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => "Yes".to_string(),
        "no" | "false" | "0" | "n" => "No".to_string(),
        _ => value.to_string(),
    }
}

fn label(key: &str) -> (&'static str, &'static str) {
    match key {
        "Size" => ("💾", "Size"),
        "Duration" => ("⌚️", "Duration"),
        "Audio" => ("🔊", "Audio"),
        "Quality" => ("🎞", "Quality"),
        "HD" => ("🟩", "HD"),
        "Subtitles" => ("💬", "Subtitles"),
        "Video" => ("🎬", "Video"),
        _ => ("🎧", "Audio Details"),
    }
}

/// Renders release metadata rows. Blank, `"null"` and `"None"` values are skipped.
pub fn format_technical_metadata(meta: &TechMetadata, heading: &str) -> Option<String> {
    let lines: Vec<String> = meta
        .fields()
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.filter(|v| !matches!(*v, "" | "null" | "None"))?;
            let value = if key == "HD" {
                normalize_hd(value)
            } else {
                value.to_string()
            };
            let (emoji, label) = label(key);
            Some(format!("{} <b>{} :</b> {}", emoji, label, html_escape(&value)))
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(block(heading, &lines))
    }
}
