//! Error types for the database module.
//!
//! Mutations surface a typed error; list queries never do — they degrade
//! to an empty result so a screen refresh cannot crash the caller.

use thiserror::Error;

/// Unified error type for database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// The key attribute already exists among active rows in its scope.
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// The key attribute was blank.
    #[error("Name must not be empty")]
    EmptyName,

    /// Record not found (or already soft-deleted).
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Underlying driver error.
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
