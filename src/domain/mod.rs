// src/domain/mod.rs
//
// Domain Root - reminders, media descriptors, timestamps.
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod media;
pub mod pending;
pub mod reminder;
pub mod timestamp;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Media
pub use media::{format_duration_label, same_media, strip_extension, MediaDescriptor, MediaType};

// Reminder
pub use reminder::{
    default_duplicate_tolerance, ensure_not_duplicate, find_conflict, Reminder, ReminderStatus,
};

// Pending selection
pub use pending::PendingSelection;

// Timestamps
pub use timestamp::{local_day, DisplayLocale, StoredTimestamp, TimestampFormatter};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors
/// These represent violations of planner rules
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Reminder for {media_name} at this time already exists")]
    DuplicateReminder {
        media_type: MediaType,
        media_name: String,
        existing_id: Uuid,
    },

    #[error("Media type and media file must both be chosen")]
    IncompleteSelection,

    #[error("Unknown media type: {0}")]
    UnknownMediaType(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
