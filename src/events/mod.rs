// src/events/mod.rs
//
// Internal Event System - Public API
//
// EventHandler is internal to the bus and is not exported.

pub mod bus;
pub mod types;

pub use types::{
    DomainEvent, PendingDateChanged, ReminderAdded, ReminderRemoved, RemindersRestored,
};

pub use bus::{EventBus, EventLogEntry, EVENT_LOG_CAPACITY};
