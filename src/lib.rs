// src/lib.rs
// MediaPlanner - scheduled reminders for local video and audio files
//
// Architecture:
// - Domain-centric: reminder rules live in the domain (duplicates, matching, timestamps)
// - Single owner: ReminderStore holds the collection, PlannerContext holds the store
// - Event-driven: changes are announced on the EventBus
// - Explicit: every mutation persists before it becomes visible

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    // Media
    format_duration_label,
    same_media,
    strip_extension,
    MediaDescriptor,
    MediaType,
    // Pending selection
    PendingSelection,
    // Reminder
    Reminder,
    ReminderStatus,
    // Timestamps
    DisplayLocale,
    TimestampFormatter,
    // Errors
    DomainError,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{PlannerConfig, DB_PATH_ENV, LOCALE_ENV, UTC_OFFSET_ENV};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    DomainEvent,
    EventBus,
    EventLogEntry,
    PendingDateChanged,
    ReminderAdded,
    ReminderRemoved,
    RemindersRestored,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    InMemoryKeyValueStore,
    KeyValueReminderRepository,
    KeyValueStore,
    ReminderRepository,
    SqliteKeyValueStore,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::CancellationToken;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AlertContent,
    AlertPayload,
    AlertRequest,
    LoggingScheduler,
    MediaCatalog,
    MediaProbe,
    ReminderScheduler,
    ReminderStore,
    StoreOptions,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{ErrorResponse, ErrorType, PlannerContext};

// Re-export application submodules
pub use application::commands;
pub use application::dto;
