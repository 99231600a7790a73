//! Data carried through the pipeline.

use serde::Deserialize;

/// Title and optional year guessed by the LLM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleGuess {
    pub title: String,
    pub year: Option<String>,
}

/// Subset of an OMDb record used for captions. Field names follow OMDb's JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetails {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    pub poster: Option<String>,
    /// `"ok"` once the record came back from a successful lookup.
    #[serde(skip)]
    pub lookup_status: String,
}

impl MovieDetails {
    /// Poster URL unless missing or `N/A`.
    pub fn poster_url(&self) -> Option<&str> {
        self.poster.as_deref().filter(|p| !p.is_empty() && *p != "N/A")
    }
}

/// Release metadata guessed from file name and caption. Values are kept as the model wrote them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechMetadata {
    pub size: Option<String>,
    pub duration: Option<String>,
    pub audio: Option<String>,
    pub quality: Option<String>,
    pub hd: Option<String>,
    pub subtitles: Option<String>,
    pub video: Option<String>,
    pub audio_details: Option<String>,
}

impl TechMetadata {
    /// Fields in display order with their JSON key.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("Size", self.size.as_deref()),
            ("Duration", self.duration.as_deref()),
            ("Audio", self.audio.as_deref()),
            ("Quality", self.quality.as_deref()),
            ("HD", self.hd.as_deref()),
            ("Subtitles", self.subtitles.as_deref()),
            ("Video", self.video.as_deref()),
            ("AudioDetails", self.audio_details.as_deref()),
        ]
    }

    pub(crate) fn set(&mut self, key: &str, value: Option<String>) {
        let slot = match key {
            "Size" => &mut self.size,
            "Duration" => &mut self.duration,
            "Audio" => &mut self.audio,
            "Quality" => &mut self.quality,
            "HD" => &mut self.hd,
            "Subtitles" => &mut self.subtitles,
            "Video" => &mut self.video,
            "AudioDetails" => &mut self.audio_details,
            _ => return,
        };
        *slot = value;
    }
}
