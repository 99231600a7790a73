//! # Prompt
//!
//! Builds the message lists Nancy sends to the completion API.
//!
//! ## Conversation prompt
//!
//! Order: System (persona with the user's name) → for each stored turn a User and an
//! Assistant message → User (new input). See [`conversation_messages`].
//!
//! ## Extraction prompts
//!
//! [`movie_title_prompt`] and [`technical_metadata_prompt`] ask the model to answer with a
//! fenced JSON block that `movie-meta` parses.
//!
//! ## External interactions
//!
//! - **LLM APIs**: output is converted to OpenAI-compatible `messages` by `llm-client`.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of the `messages` array.
///
/// `image_url` is only honoured for User messages; it carries an `https://` or `data:` URL
/// for vision models.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub image_url: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            image_url: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            image_url: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            image_url: None,
        }
    }

    /// User message with an attached image (text part + image part).
    pub fn user_with_image(content: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            image_url: Some(image_url.into()),
        }
    }
}

/// Question used for a photo sent without caption.
pub const DEFAULT_IMAGE_QUESTION: &str = "Describe this image.";

/// Nancy's persona for the given user. Empty names are omitted.
pub fn persona_system_message(user_name: &str) -> String {
    let mut out = String::from("You are Nancy, a helpful AI assistant. ");
    let name = user_name.trim();
    if !name.is_empty() {
        out.push_str("User name: ");
        out.push_str(name);
        out.push_str(". ");
    }
    out.push_str("Keep replies concise. ");
    out.push_str("Character style: I'm Nancy🦋 💕 Spreading kindness and positivity. ");
    out.push_str(
        "If the received message looks like a movie name, ask the user to send the movie file \
         here so you can add its plot and rating (that is handled separately).",
    );
    out
}

/// Builds the conversation prompt: persona, then `(input, output)` turns oldest first, then the new input.
pub fn conversation_messages<I, U, A>(user_name: &str, history: I, input: &str) -> Vec<ChatMessage>
where
    I: IntoIterator<Item = (U, A)>,
    U: AsRef<str>,
    A: AsRef<str>,
{
    let mut messages = vec![ChatMessage::system(persona_system_message(user_name))];
    for (user, assistant) in history {
        messages.push(ChatMessage::user(user.as_ref()));
        messages.push(ChatMessage::assistant(assistant.as_ref()));
    }
    messages.push(ChatMessage::user(input));
    messages
}

/// Prompt for image analysis: persona + one multimodal User message.
pub fn image_messages(user_name: &str, question: Option<&str>, image_url: &str) -> Vec<ChatMessage> {
    let question = question
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_IMAGE_QUESTION);
    vec![
        ChatMessage::system(persona_system_message(user_name)),
        ChatMessage::user_with_image(question, image_url),
    ]
}

/// Asks for `{"movie": ..., "year": ...}` in a fenced JSON block.
pub fn movie_title_prompt(text: &str) -> String {
    format!(
        "Extract the movie title and release year from this text.\n\
         Return in JSON format with keys 'movie' and 'year', inside a ```json code block. \
         If the title looks like two joined words, separate them with a space.\n\
         Text: \"{}\"",
        text
    )
}

/// Keys requested by [`technical_metadata_prompt`], in display order.
pub const TECHNICAL_METADATA_KEYS: [&str; 8] = [
    "Size",
    "Duration",
    "Audio",
    "Quality",
    "HD",
    "Subtitles",
    "Video",
    "AudioDetails",
];

/// Asks for release metadata (size, quality, codecs, ...) in a fenced JSON block.
pub fn technical_metadata_prompt(text: &str) -> String {
    format!(
        "Extract the following movie metadata from this text:\n\
         - Size (e.g., \"1.5GB\")\n\
         - Duration (e.g., \"2h 35m\")\n\
         - Audio (languages, e.g., \"Tamil, English\")\n\
         - Quality (e.g., \"1080p\")\n\
         - HD (Yes/No)\n\
         - Subtitles (e.g., \"English\")\n\
         - Video (e.g., \"HEVC H.265 MKV\")\n\
         - Audio details (e.g., \"DD+5.1 - 192Kbps & AAC\")\n\n\
         Return the result in JSON format inside a ```json code block with keys: {}.\n\
         If any value is not available, set it to null.\n\n\
         Text: \"{}\"",
        TECHNICAL_METADATA_KEYS.join(", "),
        text
    )
}
