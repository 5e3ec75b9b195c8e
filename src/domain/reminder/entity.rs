use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::media::{same_media, MediaType};
use crate::domain::timestamp::{normalize, reference_date};

/// A scheduled alert tied to one media item and one timestamp.
///
/// Field names on the wire are fixed: `id`, `date`, `mediaType`, `mediaName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    /// Immutable identifier, assigned at creation
    pub id: Uuid,

    /// Moment the reminder should fire
    #[serde(with = "reference_date")]
    pub date: DateTime<Utc>,

    pub media_type: MediaType,

    /// Media file identifier (not the display name)
    pub media_name: String,
}

/// Whether a reminder is still ahead of a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Upcoming,
    Expired,
}

impl Reminder {
    pub fn new(date: DateTime<Utc>, media_type: MediaType, media_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: normalize(date),
            media_type,
            media_name: media_name.into(),
        }
    }

    /// Extension-agnostic check against a media file of the given type
    pub fn targets(&self, media_type: MediaType, media_file_id: &str) -> bool {
        self.media_type == media_type && same_media(media_type, &self.media_name, media_file_id)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> ReminderStatus {
        if self.date > now {
            ReminderStatus::Upcoming
        } else {
            ReminderStatus::Expired
        }
    }
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderStatus::Upcoming => write!(f, "upcoming"),
            ReminderStatus::Expired => write!(f, "expired"),
        }
    }
}
