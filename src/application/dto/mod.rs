// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only; inputs are parsed by commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MediaDescriptor, PendingSelection, Reminder, TimestampFormatter};

// ============================================================================
// REMINDER DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderDto {
    pub id: String,
    /// RFC 3339, UTC
    pub date: String,
    pub media_type: String,
    pub media_name: String,
    /// Locale-formatted date for display
    pub formatted_date: String,
    /// "upcoming" or "expired"
    pub status: String,
}

impl ReminderDto {
    pub fn from_reminder(reminder: &Reminder, formatter: &TimestampFormatter, now: DateTime<Utc>) -> Self {
        Self {
            id: reminder.id.to_string(),
            date: reminder.date.to_rfc3339(),
            media_type: reminder.media_type.to_string(),
            media_name: reminder.media_name.clone(),
            formatted_date: formatter.format(reminder.date),
            status: reminder.status_at(now).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddReminderDto {
    /// RFC 3339
    pub date: String,
    pub media_type: String,
    pub media_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleReminderDto {
    pub reminder_id: String,
    /// RFC 3339
    pub new_date: String,
}

// ============================================================================
// PENDING SELECTION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingSelectionDto {
    pub date: String,
    pub formatted_date: String,
    pub media_type: Option<String>,
    pub media_name: Option<String>,
}

impl PendingSelectionDto {
    pub fn from_pending(pending: &PendingSelection, formatter: &TimestampFormatter) -> Self {
        Self {
            date: pending.date.to_rfc3339(),
            formatted_date: formatter.format(pending.date),
            media_type: pending.media_type.map(|t| t.to_string()),
            media_name: pending.media_name.clone(),
        }
    }
}

// ============================================================================
// MEDIA DTOs
// ============================================================================

/// One row of a media list, with its reminder (if any) attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRowDto {
    pub file_id: String,
    pub name: String,
    pub media_type: String,
    pub duration_label: String,
    pub reminder: Option<ReminderDto>,
}

impl MediaRowDto {
    pub fn new(descriptor: MediaDescriptor, reminder: Option<ReminderDto>) -> Self {
        Self {
            file_id: descriptor.file_id,
            name: descriptor.name,
            media_type: descriptor.media_type.to_string(),
            duration_label: descriptor.duration_label,
            reminder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayLocale, MediaType};
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_reminder_dto_formats_and_classifies() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let reminder = Reminder::new(date, MediaType::Video, "clip1.mp4");
        let formatter = TimestampFormatter::new(DisplayLocale::DeDe, FixedOffset::east_opt(0).unwrap());

        let dto = ReminderDto::from_reminder(&reminder, &formatter, date - chrono::Duration::hours(1));

        assert_eq!(dto.id, reminder.id.to_string());
        assert_eq!(dto.date, "2025-01-01T10:00:00+00:00");
        assert_eq!(dto.media_type, "video");
        assert_eq!(dto.formatted_date, "01.01.2025, 10:00");
        assert_eq!(dto.status, "upcoming");
    }

    #[test]
    fn test_media_row_keeps_descriptor_fields() {
        let descriptor = MediaDescriptor::new(MediaType::Audio, "track1.mp3", None);
        let row = MediaRowDto::new(descriptor, None);

        assert_eq!(row.name, "track1");
        assert_eq!(row.file_id, "track1.mp3");
        assert_eq!(row.duration_label, "--:--");
        assert!(row.reminder.is_none());
    }
}
