// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod media_catalog;
pub mod reminder_store;
pub mod scheduler;


// Re-export all services and their types
pub use reminder_store::{
    ReminderStore,
    StoreOptions,
};

pub use scheduler::{
    AlertContent,
    AlertPayload,
    AlertRequest,
    LoggingScheduler,
    ReminderScheduler,
    ALERT_TITLE,
};

pub use media_catalog::{
    MediaCatalog,
    MediaProbe,
};
