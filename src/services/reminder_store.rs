// src/services/reminder_store.rs
//
// Reminder Store - the authoritative owner of the reminder collection.
//
// RULES:
// - Only the store mutates reminders; callers get snapshots or derived views
// - Every reminder mutation persists the full collection before it becomes visible
// - Pending-date changes persist only the pending date
// - Near-duplicate adds are rejected here, whatever the caller checked

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::timestamp::normalize;
use crate::domain::{
    default_duplicate_tolerance, ensure_not_duplicate, DomainError, MediaType, PendingSelection,
    Reminder, ReminderStatus, TimestampFormatter,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, PendingDateChanged, ReminderAdded, ReminderRemoved, RemindersRestored,
};
use crate::repositories::ReminderRepository;
use crate::services::scheduler::{AlertRequest, ReminderScheduler};

/// Tunables for a store instance
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub formatter: TimestampFormatter,
    pub duplicate_tolerance: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            formatter: TimestampFormatter::default(),
            duplicate_tolerance: default_duplicate_tolerance(),
        }
    }
}

pub struct ReminderStore {
    repository: Arc<dyn ReminderRepository>,
    scheduler: Arc<dyn ReminderScheduler>,
    event_bus: Arc<EventBus>,
    options: StoreOptions,

    /// Insertion order
    reminders: Vec<Reminder>,
    pending: PendingSelection,
}

impl ReminderStore {
    /// Build a store from persisted state.
    ///
    /// Missing or unreadable reminder data yields an empty store; a missing
    /// or unreadable pending date defaults to now. Storage failures other
    /// than decoding are returned.
    pub fn initialize(
        repository: Arc<dyn ReminderRepository>,
        scheduler: Arc<dyn ReminderScheduler>,
        event_bus: Arc<EventBus>,
        options: StoreOptions,
    ) -> AppResult<Self> {
        let pending_date = match repository.load_pending_date() {
            Ok(Some(date)) => date,
            Ok(None) => Utc::now(),
            Err(AppError::Serialization(e)) => {
                log::warn!("Discarding unreadable pending date: {}", e);
                Utc::now()
            }
            Err(e) => return Err(e),
        };

        let mut store = Self {
            repository,
            scheduler,
            event_bus,
            options,
            reminders: Vec::new(),
            pending: PendingSelection::new(pending_date),
        };
        store.reload()?;

        log::info!("Reminder store ready with {} reminders", store.reminders.len());
        Ok(store)
    }

    /// Re-read the persisted reminder collection, replacing in-memory state
    pub fn reload(&mut self) -> AppResult<()> {
        let (reminders, discarded) = match self.repository.load_reminders() {
            Ok(Some(reminders)) => (reminders, false),
            Ok(None) => (Vec::new(), false),
            Err(AppError::Serialization(e)) => {
                log::warn!("Persisted reminders are unreadable, starting empty: {}", e);
                (Vec::new(), true)
            }
            Err(e) => return Err(e),
        };

        self.reminders = reminders;
        self.event_bus
            .emit(RemindersRestored::new(self.reminders.len(), discarded));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Store a new reminder and hand it to the scheduler.
    ///
    /// Fails with `DomainError::DuplicateReminder` when a reminder for the
    /// same media already exists within the duplicate tolerance of `date`.
    pub fn add_reminder(
        &mut self,
        date: DateTime<Utc>,
        media_type: MediaType,
        media_name: impl Into<String>,
    ) -> AppResult<Reminder> {
        let media_name = media_name.into();

        // The window is measured on the requested instant, before it is
        // rounded to stored precision
        ensure_not_duplicate(
            &self.reminders,
            date,
            media_type,
            &media_name,
            self.options.duplicate_tolerance,
        )?;

        let reminder = Reminder::new(date, media_type, media_name);

        let mut next = self.reminders.clone();
        next.push(reminder.clone());
        self.commit(next)?;

        log::info!(
            "Added reminder {} for {} {} at {}",
            reminder.id,
            reminder.media_type,
            reminder.media_name,
            reminder.date.to_rfc3339()
        );

        self.event_bus.emit(ReminderAdded::new(reminder.clone()));
        self.hand_off(&reminder);

        Ok(reminder)
    }

    /// Remove the reminder with `id`. Absent ids are not an error.
    pub fn remove_reminder(&mut self, id: Uuid) -> AppResult<Option<Reminder>> {
        let removed = self.remove_where(|r| r.id == id)?;
        Ok(removed.into_iter().next())
    }

    /// Remove entries by position in the date-sorted view.
    ///
    /// Out-of-range positions are ignored.
    pub fn remove_reminders<I>(&mut self, at_indexes: I) -> AppResult<Vec<Reminder>>
    where
        I: IntoIterator<Item = usize>,
    {
        let sorted = self.reminders_sorted_by_date();
        let ids: HashSet<Uuid> = at_indexes
            .into_iter()
            .filter_map(|idx| sorted.get(idx).map(|r| r.id))
            .collect();

        self.remove_where(|r| ids.contains(&r.id))
    }

    /// Remove every reminder that targets the given media file
    pub fn remove_reminders_for_media(
        &mut self,
        media_type: MediaType,
        media_file_id: &str,
    ) -> AppResult<usize> {
        let removed = self.remove_where(|r| r.targets(media_type, media_file_id))?;
        Ok(removed.len())
    }

    /// Move a reminder to a new date.
    ///
    /// Implemented as delete + add: the replacement gets a fresh id and is
    /// appended. The duplicate rule is checked against the other reminders
    /// before anything changes.
    pub fn reschedule_reminder(&mut self, id: Uuid, new_date: DateTime<Utc>) -> AppResult<Reminder> {
        let existing = self
            .reminders
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("reminder {}", id)))?;

        ensure_not_duplicate(
            self.reminders.iter().filter(|r| r.id != id),
            new_date,
            existing.media_type,
            &existing.media_name,
            self.options.duplicate_tolerance,
        )?;

        let replacement = Reminder::new(new_date, existing.media_type, existing.media_name.clone());

        let mut next: Vec<Reminder> = self.reminders.iter().filter(|r| r.id != id).cloned().collect();
        next.push(replacement.clone());
        self.commit(next)?;

        log::info!("Rescheduled reminder {} as {}", existing.id, replacement.id);

        self.event_bus.emit(ReminderRemoved::new(&existing));
        self.withdraw(&existing);
        self.event_bus.emit(ReminderAdded::new(replacement.clone()));
        self.hand_off(&replacement);

        Ok(replacement)
    }

    // ------------------------------------------------------------------
    // Pending selection
    // ------------------------------------------------------------------

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    /// Update the pending date; persists only that entry
    pub fn set_pending_date(&mut self, date: DateTime<Utc>) -> AppResult<()> {
        let date = normalize(date);
        self.repository.save_pending_date(date)?;
        self.pending.date = date;
        self.event_bus.emit(PendingDateChanged::new(date));
        Ok(())
    }

    pub fn select_pending_media(&mut self, media_type: MediaType, media_name: impl Into<String>) {
        self.pending.media_type = Some(media_type);
        self.pending.media_name = Some(media_name.into());
    }

    pub fn clear_pending_media(&mut self) {
        self.pending.media_type = None;
        self.pending.media_name = None;
    }

    /// Add a reminder from the pending selection
    pub fn commit_pending(&mut self) -> AppResult<Reminder> {
        let (date, media_type, media_name) = {
            let (date, media_type, name) = self.pending.complete()?;
            (date, media_type, name.to_string())
        };
        self.add_reminder(date, media_type, media_name)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Snapshot in insertion order
    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    /// Ascending by date; equal dates keep insertion order
    pub fn reminders_sorted_by_date(&self) -> Vec<Reminder> {
        let mut sorted = self.reminders.clone();
        sorted.sort_by_key(|r| r.date);
        sorted
    }

    /// First reminder (insertion order) for the media file, ignoring extensions
    pub fn find_reminder(&self, media_type: MediaType, media_file_id: &str) -> Option<&Reminder> {
        self.reminders
            .iter()
            .find(|r| r.targets(media_type, media_file_id))
    }

    /// Reminders falling on a calendar day in the store's display offset
    pub fn reminders_on(&self, day: NaiveDate) -> Vec<&Reminder> {
        let mut on_day: Vec<&Reminder> = self
            .reminders
            .iter()
            .filter(|r| self.options.formatter.local_day(r.date) == day)
            .collect();
        on_day.sort_by_key(|r| r.date);
        on_day
    }

    pub fn has_reminder_on(&self, day: NaiveDate) -> bool {
        self.reminders
            .iter()
            .any(|r| self.options.formatter.local_day(r.date) == day)
    }

    pub fn status_of(&self, reminder: &Reminder, now: DateTime<Utc>) -> ReminderStatus {
        reminder.status_at(now)
    }

    pub fn format_timestamp(&self, date: DateTime<Utc>) -> String {
        self.options.formatter.format(date)
    }

    pub fn formatter(&self) -> &TimestampFormatter {
        &self.options.formatter
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Persist `next`, then make it the visible collection
    fn commit(&mut self, next: Vec<Reminder>) -> AppResult<()> {
        self.repository.save_reminders(&next)?;
        self.reminders = next;
        Ok(())
    }

    fn remove_where<F>(&mut self, predicate: F) -> AppResult<Vec<Reminder>>
    where
        F: Fn(&Reminder) -> bool,
    {
        let (removed, kept): (Vec<Reminder>, Vec<Reminder>) =
            self.reminders.iter().cloned().partition(|r| predicate(r));

        self.commit(kept)?;

        for reminder in &removed {
            log::info!("Removed reminder {} for {}", reminder.id, reminder.media_name);
            self.event_bus.emit(ReminderRemoved::new(reminder));
            self.withdraw(reminder);
        }

        Ok(removed)
    }

    fn hand_off(&self, reminder: &Reminder) {
        if let Err(e) = self.scheduler.schedule(&AlertRequest::for_reminder(reminder)) {
            log::warn!("Scheduler rejected reminder {}: {}", reminder.id, e);
        }
    }

    fn withdraw(&self, reminder: &Reminder) {
        if let Err(e) = self.scheduler.cancel(reminder.id) {
            log::warn!("Scheduler could not withdraw reminder {}: {}", reminder.id, e);
        }
    }
}
