//! Assembles the caption of a re-posted media message.
//!
//! Lengths are counted in chars (Unicode scalar values); Telegram allows 1024 per caption.

use crate::format::{
    format_duration, format_movie_details, format_technical_metadata, html_escape,
    METADATA_HEADING, MOVIE_HEADING,
};
use crate::types::{MovieDetails, TechMetadata};

/// Telegram caption limit.
pub const CAPTION_LIMIT: usize = 1024;
/// Captions longer than this are cut to `TRUNCATE_AT - 3` chars + `...`.
const TRUNCATE_AT: usize = 1020;
const POWERED_BY: &str = r#"⚡Powered by: <a href="https://t.me/Nancy_MetaAI_Bot">Nancy</a>"#;
const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Who sent the media; rendered as a link in the caption footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub username: Option<String>,
    pub full_name: String,
}

impl Sender {
    fn link_and_display(&self) -> (String, String) {
        match self.username.as_deref().filter(|u| !u.is_empty()) {
            Some(username) => (format!("https://t.me/{}", username), format!("@{}", username)),
            None => {
                let display = if self.full_name.trim().is_empty() {
                    "User".to_string()
                } else {
                    self.full_name.clone()
                };
                (format!("tg://user?id={}", self.id), display)
            }
        }
    }

    /// `Sent by: <a href=..>name</a> | ⚡Powered by: ..`
    pub fn footer(&self) -> String {
        let (link, display) = self.link_and_display();
        format!(
            r#"Sent by: <a href="{}">{}</a> | {}"#,
            link,
            html_escape(&display),
            POWERED_BY
        )
    }
}

/// Inputs of a media caption; call [`MediaCaption::render`].
#[derive(Debug, Clone, Default)]
pub struct MediaCaption<'a> {
    pub details: Option<&'a MovieDetails>,
    pub metadata: Option<TechMetadata>,
    pub original_caption: &'a str,
    pub sender: Option<&'a Sender>,
}

impl MediaCaption<'_> {
    fn body(&self) -> String {
        let original = self.original_caption.trim();
        let movie_block = self
            .details
            .and_then(|d| format_movie_details(d, MOVIE_HEADING));

        match movie_block {
            Some(movie_block) => {
                let runtime = self
                    .details
                    .and_then(|d| d.runtime.as_deref())
                    .and_then(format_duration);
                let metadata_block = self.metadata.clone().and_then(|mut meta| {
                    if let Some(runtime) = runtime {
                        meta.duration = Some(runtime);
                    }
                    format_technical_metadata(&meta, METADATA_HEADING)
                });
                match metadata_block {
                    Some(meta) => format!("{}\n\n{}", movie_block, meta),
                    None if !original.is_empty() => format!(
                        "{}\n\n<b>Original Caption ↓</b>\n💬 {}",
                        movie_block,
                        html_escape(original)
                    ),
                    None => movie_block,
                }
            }
            None => self
                .metadata
                .as_ref()
                .and_then(|meta| format_technical_metadata(meta, METADATA_HEADING))
                .unwrap_or_else(|| {
                    if original.is_empty() {
                        "Media".to_string()
                    } else {
                        html_escape(original)
                    }
                }),
        }
    }

    /// Final caption: body, sender footer if it fits, change marker, truncation.
    pub fn render(&self) -> String {
        let mut caption = self.body();

        if let Some(sender) = self.sender {
            let footer = sender.footer();
            if !caption.contains(&footer) {
                let addition = format!("\n\n{}", footer);
                if caption.chars().count() + addition.chars().count() <= CAPTION_LIMIT {
                    caption.push_str(&addition);
                }
            }
        }

        // Telegram rejects a copy whose caption equals the original.
        if caption.trim() == self.original_caption.trim() {
            caption.push(ZERO_WIDTH_SPACE);
        }

        if caption.chars().count() > TRUNCATE_AT {
            caption = caption.chars().take(TRUNCATE_AT - 3).collect();
            caption.push_str("...");
        }
        caption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Sender {
        Sender {
            id: 42,
            username: Some("ada".to_string()),
            full_name: "Ada L".to_string(),
        }
    }

    #[test]
    fn footer_with_and_without_username() {
        assert_eq!(
            sender().footer(),
            r#"Sent by: <a href="https://t.me/ada">@ada</a> | ⚡Powered by: <a href="https://t.me/Nancy_MetaAI_Bot">Nancy</a>"#
        );
        let anon = Sender {
            id: 7,
            username: None,
            full_name: "".to_string(),
        };
        assert!(anon.footer().starts_with(r#"Sent by: <a href="tg://user?id=7">User</a>"#));
    }

    #[test]
    fn no_details_no_metadata_uses_escaped_caption() {
        let caption = MediaCaption {
            original_caption: "  Tom & Jerry  ",
            ..Default::default()
        };
        assert_eq!(caption.render(), "Tom &amp; Jerry");
    }

    #[test]
    fn unchanged_caption_gets_zero_width_space() {
        let caption = MediaCaption {
            original_caption: "plain caption",
            ..Default::default()
        };
        assert_eq!(caption.render(), "plain caption\u{200B}");
    }

    #[test]
    fn empty_everything_is_media() {
        assert_eq!(MediaCaption::default().render(), "Media");
    }

    #[test]
    fn runtime_overrides_metadata_duration() {
        let details = MovieDetails {
            title: Some("Heat".to_string()),
            runtime: Some("170 min".to_string()),
            ..Default::default()
        };
        let caption = MediaCaption {
            details: Some(&details),
            metadata: Some(TechMetadata {
                duration: Some("1h".to_string()),
                size: Some("2GB".to_string()),
                ..Default::default()
            }),
            original_caption: "Heat.1995.mkv",
            sender: None,
        };
        let out = caption.render();
        assert!(out.contains("<b>Metadata:</b>"));
        assert!(out.contains("💾 <b>Size :</b> 2GB\n⌚️ <b>Duration :</b> 2h 50m"));
        assert!(!out.contains("Original Caption"));
    }

    #[test]
    fn details_without_metadata_keep_original_caption() {
        let details = MovieDetails {
            title: Some("Heat".to_string()),
            ..Default::default()
        };
        let sender = sender();
        let caption = MediaCaption {
            details: Some(&details),
            metadata: None,
            original_caption: "<rip>",
            sender: Some(&sender),
        };
        let out = caption.render();
        assert!(out.contains("\n\n<b>Original Caption ↓</b>\n💬 &lt;rip&gt;"));
        assert!(out.ends_with(r#"<a href="https://t.me/Nancy_MetaAI_Bot">Nancy</a>"#));
    }

    #[test]
    fn long_caption_is_truncated_without_footer() {
        let long = "x".repeat(1500);
        let sender = sender();
        let caption = MediaCaption {
            original_caption: &long,
            sender: Some(&sender),
            ..Default::default()
        };
        let out = caption.render();
        assert_eq!(out.chars().count(), 1020);
        assert!(out.ends_with("..."));
        assert!(!out.contains("Sent by"));
    }
}
