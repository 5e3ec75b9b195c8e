use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::media::MediaType;
use crate::domain::timestamp::normalize;
use crate::domain::{DomainError, DomainResult};

/// The in-progress choice a user builds before committing a reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    pub date: DateTime<Utc>,
    pub media_type: Option<MediaType>,
    pub media_name: Option<String>,
}

impl PendingSelection {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date: normalize(date),
            media_type: None,
            media_name: None,
        }
    }

    /// The (date, type, name) triple, once both media fields are chosen
    pub fn complete(&self) -> DomainResult<(DateTime<Utc>, MediaType, &str)> {
        match (self.media_type, self.media_name.as_deref()) {
            (Some(media_type), Some(name)) if !name.is_empty() => Ok((self.date, media_type, name)),
            _ => Err(DomainError::IncompleteSelection),
        }
    }
}
