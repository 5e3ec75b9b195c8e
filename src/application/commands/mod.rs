// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between a presentation layer and the store
// - Commands accept DTOs / strings, return DTOs
// - Commands convert every failure into an ErrorResponse
// - Commands NEVER contain business logic

pub mod media_commands;
pub mod reminder_commands;

pub use media_commands::*;
pub use reminder_commands::*;
