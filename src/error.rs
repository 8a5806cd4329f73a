//! Error types for Bookshelf server

use serde::Serialize;
use thiserror::Error;

use crate::models::book::DateParseError;

/// Main application error type.
///
/// Shared by the repository and service layers. Only the API layer turns
/// these into HTTP statuses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] DateParseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Client-caused failures (malformed input), never retried
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::InvalidDate(_) | AppError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
