// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the store and services
// - It provides the boundary between a presentation layer and the planner
// - It owns the wiring (PlannerContext)
// - It translates between DTOs and domain entities

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::PlannerContext;
