// src/events/types.rs
//
// Planner events.
// Each event is an immutable fact that has already happened to the store.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{MediaType, Reminder};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    fn event_id(&self) -> Uuid;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// REMINDER EVENTS
// ============================================================================

/// Emitted after a reminder has been stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reminder: Reminder,
}

impl ReminderAdded {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reminder,
        }
    }
}

impl DomainEvent for ReminderAdded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReminderAdded" }
}

/// Emitted once per removed reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reminder_id: Uuid,
    pub media_type: MediaType,
    pub media_name: String,
}

impl ReminderRemoved {
    pub fn new(reminder: &Reminder) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reminder_id: reminder.id,
            media_type: reminder.media_type,
            media_name: reminder.media_name.clone(),
        }
    }
}

impl DomainEvent for ReminderRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ReminderRemoved" }
}

/// Emitted when persisted reminders are (re)loaded into the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersRestored {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub count: usize,
    /// True when persisted data was unreadable and the store started empty
    pub discarded_corrupt_data: bool,
}

impl RemindersRestored {
    pub fn new(count: usize, discarded_corrupt_data: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            count,
            discarded_corrupt_data,
        }
    }
}

impl DomainEvent for RemindersRestored {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "RemindersRestored" }
}

// ============================================================================
// PENDING SELECTION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingDateChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub date: DateTime<Utc>,
}

impl PendingDateChanged {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            date,
        }
    }
}

impl DomainEvent for PendingDateChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "PendingDateChanged" }
}
