// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Same media already planned at this time (409)
    Duplicate,

    /// Database/persistence error (500)
    Database,

    /// File system error (500)
    FileSystem,

    /// Work abandoned by its caller
    Cancelled,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Domain(domain_error) => Self::from_domain_error(domain_error),

            AppError::Database(db_error) => {
                // Log full error for debugging
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    ErrorType::FileSystem,
                    "File system operation failed",
                    Some(io_error.to_string()),
                )
            }

            AppError::Cancelled => Self::new(ErrorType::Cancelled, "Operation cancelled", None),

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    fn from_domain_error(error: DomainError) -> Self {
        match error {
            DomainError::DuplicateReminder { media_name, .. } => Self::new(
                ErrorType::Duplicate,
                format!("⚠️ Reminder for {} at this time already exists!", media_name),
                None,
            ),

            DomainError::IncompleteSelection => Self::new(
                ErrorType::Validation,
                "Please choose both media type and file before setting a reminder.",
                None,
            ),

            DomainError::NotFound(what) => Self::not_found(&what),

            other @ (DomainError::UnknownMediaType(_) | DomainError::UnsupportedLocale(_)) => {
                Self::validation(other.to_string())
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}
