// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO event emission
// - Decode failures are returned, never swallowed

pub mod key_value_store;
pub mod reminder_repository;

pub use key_value_store::{InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore};
pub use reminder_repository::{
    KeyValueReminderRepository, ReminderRepository, PENDING_DATE_KEY, REMINDERS_KEY,
};
