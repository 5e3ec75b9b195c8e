pub mod entity;
pub mod invariants;

pub use entity::{Reminder, ReminderStatus};
pub use invariants::{default_duplicate_tolerance, ensure_not_duplicate, find_conflict};
