use chrono::{DateTime, Duration, Utc};

use super::entity::Reminder;
use crate::domain::media::MediaType;
use crate::domain::{DomainError, DomainResult};

/// Window within which two reminders for the same media count as the same moment
pub const DUPLICATE_TOLERANCE_MS: i64 = 1_000;

pub fn default_duplicate_tolerance() -> Duration {
    Duration::milliseconds(DUPLICATE_TOLERANCE_MS)
}

/// First reminder that would collide with the candidate, if any.
///
/// A collision is an exact match on media type and media name with dates
/// strictly less than `tolerance` apart.
pub fn find_conflict<'a, I>(
    existing: I,
    date: DateTime<Utc>,
    media_type: MediaType,
    media_name: &str,
    tolerance: Duration,
) -> Option<&'a Reminder>
where
    I: IntoIterator<Item = &'a Reminder>,
{
    existing.into_iter().find(|r| {
        r.media_type == media_type && r.media_name == media_name && (r.date - date).abs() < tolerance
    })
}

/// Rejects a candidate that collides with an existing reminder
pub fn ensure_not_duplicate<'a, I>(
    existing: I,
    date: DateTime<Utc>,
    media_type: MediaType,
    media_name: &str,
    tolerance: Duration,
) -> DomainResult<()>
where
    I: IntoIterator<Item = &'a Reminder>,
{
    match find_conflict(existing, date, media_type, media_name, tolerance) {
        Some(conflict) => Err(DomainError::DuplicateReminder {
            media_type,
            media_name: media_name.to_string(),
            existing_id: conflict.id,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_within_tolerance_conflicts() {
        let existing = vec![Reminder::new(base(), MediaType::Video, "clip1.mp4")];
        let result = ensure_not_duplicate(
            &existing,
            base() + Duration::milliseconds(500),
            MediaType::Video,
            "clip1.mp4",
            default_duplicate_tolerance(),
        );

        match result {
            Err(DomainError::DuplicateReminder { existing_id, .. }) => {
                assert_eq!(existing_id, existing[0].id)
            }
            other => panic!("Expected DuplicateReminder, got {:?}", other),
        }
    }

    #[test]
    fn test_exactly_one_second_apart_is_allowed() {
        let existing = vec![Reminder::new(base(), MediaType::Video, "clip1.mp4")];
        let result = ensure_not_duplicate(
            &existing,
            base() - Duration::seconds(1),
            MediaType::Video,
            "clip1.mp4",
            default_duplicate_tolerance(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_other_media_never_conflicts() {
        let existing = vec![Reminder::new(base(), MediaType::Video, "clip1.mp4")];
        let tolerance = default_duplicate_tolerance();

        assert!(ensure_not_duplicate(&existing, base(), MediaType::Audio, "clip1.mp4", tolerance).is_ok());
        assert!(ensure_not_duplicate(&existing, base(), MediaType::Video, "clip2.mp4", tolerance).is_ok());
        // Duplicate detection compares names exactly, unlike lookup
        assert!(ensure_not_duplicate(&existing, base(), MediaType::Video, "clip1", tolerance).is_ok());
    }
}
