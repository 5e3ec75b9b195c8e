// src/infrastructure/mod.rs
//
// Infrastructure Layer
//
// Implementation details that support services but are not part of the
// domain itself.

pub mod cancellation;

pub use cancellation::CancellationToken;
