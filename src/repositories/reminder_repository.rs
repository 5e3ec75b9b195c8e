// src/repositories/reminder_repository.rs
//
// Reminder Repository
//
// Maps planner state onto two independent key-value entries:
// - "allMediaReminders": JSON array of reminders
// - "selectedPlannerDate": single timestamp
//
// Decoding failures are returned as errors; deciding what to do with
// unreadable data is the store's job.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::{Reminder, StoredTimestamp};
use crate::error::AppResult;
use crate::repositories::key_value_store::KeyValueStore;

pub const REMINDERS_KEY: &str = "allMediaReminders";
pub const PENDING_DATE_KEY: &str = "selectedPlannerDate";

// ---------------------------------------------------------------------
// Repository contract
// ---------------------------------------------------------------------
pub trait ReminderRepository: Send + Sync {
    /// `None` when nothing has been persisted yet
    fn load_reminders(&self) -> AppResult<Option<Vec<Reminder>>>;

    fn save_reminders(&self, reminders: &[Reminder]) -> AppResult<()>;

    fn load_pending_date(&self) -> AppResult<Option<DateTime<Utc>>>;

    fn save_pending_date(&self, date: DateTime<Utc>) -> AppResult<()>;
}

// ---------------------------------------------------------------------
// Key-value Implementation
// ---------------------------------------------------------------------
pub struct KeyValueReminderRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueReminderRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl ReminderRepository for KeyValueReminderRepository {
    fn load_reminders(&self) -> AppResult<Option<Vec<Reminder>>> {
        match self.store.get(REMINDERS_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_reminders(&self, reminders: &[Reminder]) -> AppResult<()> {
        let json = serde_json::to_string(reminders)?;
        self.store.set(REMINDERS_KEY, &json)?;
        log::debug!("Persisted {} reminders", reminders.len());
        Ok(())
    }

    fn load_pending_date(&self) -> AppResult<Option<DateTime<Utc>>> {
        match self.store.get(PENDING_DATE_KEY)? {
            Some(json) => {
                let stored: StoredTimestamp = serde_json::from_str(&json)?;
                Ok(Some(stored.0))
            }
            None => Ok(None),
        }
    }

    fn save_pending_date(&self, date: DateTime<Utc>) -> AppResult<()> {
        let json = serde_json::to_string(&StoredTimestamp(date))?;
        self.store.set(PENDING_DATE_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaType;
    use crate::error::AppError;
    use crate::repositories::key_value_store::InMemoryKeyValueStore;
    use chrono::TimeZone;

    fn repository() -> (Arc<InMemoryKeyValueStore>, KeyValueReminderRepository) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = KeyValueReminderRepository::new(store.clone());
        (store, repo)
    }

    #[test]
    fn test_nothing_persisted_yet() {
        let (_, repo) = repository();
        assert!(repo.load_reminders().unwrap().is_none());
        assert!(repo.load_pending_date().unwrap().is_none());
    }

    #[test]
    fn test_reminders_round_trip() {
        let (_, repo) = repository();
        let reminders = vec![
            Reminder::new(Utc::now(), MediaType::Video, "clip1.mp4"),
            Reminder::new(Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(), MediaType::Audio, "track1"),
        ];

        repo.save_reminders(&reminders).unwrap();

        assert_eq!(repo.load_reminders().unwrap().unwrap(), reminders);
    }

    #[test]
    fn test_entries_are_independent() {
        let (store, repo) = repository();
        let date = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();

        repo.save_pending_date(date).unwrap();
        assert!(store.get(REMINDERS_KEY).unwrap().is_none());

        repo.save_reminders(&[]).unwrap();
        assert_eq!(store.get(REMINDERS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(repo.load_pending_date().unwrap(), Some(date));
    }

    #[test]
    fn test_malformed_entry_is_a_serialization_error() {
        let (store, repo) = repository();
        store.set(REMINDERS_KEY, "{not json").unwrap();

        let result = repo.load_reminders();
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
