use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use super::normalization::{has_known_extension, strip_extension};
use crate::domain::DomainError;

/// Kind of media a reminder points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
}

const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".m4v"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav"];

impl MediaType {
    /// File extensions (with leading dot) recognised for this media type
    pub fn known_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaType::Video => VIDEO_EXTENSIONS,
            MediaType::Audio => AUDIO_EXTENSIONS,
        }
    }

    /// Infer the media type from a file name's extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        [MediaType::Video, MediaType::Audio]
            .into_iter()
            .find(|t| has_known_extension(file_name, t.known_extensions()))
    }

    /// File name with one of this type's extensions removed
    pub fn display_name<'a>(&self, file_id: &'a str) -> &'a str {
        strip_extension(file_id, self.known_extensions())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaType::Video),
            "audio" => Ok(MediaType::Audio),
            other => Err(DomainError::UnknownMediaType(other.to_string())),
        }
    }
}

/// Display-ready summary of one media file.
///
/// Produced by the media catalog loader; the planner core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub id: Uuid,

    /// File name without extension
    pub name: String,

    /// Full file identifier, e.g. "clip1.mp4"
    pub file_id: String,

    pub media_type: MediaType,

    /// "mm:ss", or "--:--" when the duration could not be read
    pub duration_label: String,
}

impl MediaDescriptor {
    pub fn new(media_type: MediaType, file_id: impl Into<String>, duration: Option<Duration>) -> Self {
        let file_id = file_id.into();
        let name = media_type.display_name(&file_id).to_string();
        Self {
            id: Uuid::new_v4(),
            name,
            file_id,
            media_type,
            duration_label: format_duration_label(duration),
        }
    }
}

/// Render a media duration as zero-padded "mm:ss".
///
/// Minutes are not wrapped into hours; sub-second remainders are dropped.
pub fn format_duration_label(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => {
            let seconds = d.as_secs();
            format!("{:02}:{:02}", seconds / 60, seconds % 60)
        }
        None => "--:--".to_string(),
    }
}
