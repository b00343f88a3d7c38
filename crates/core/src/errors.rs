//! Core error types for the habit tracker.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use chrono::Duration;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the habit tracker.
///
/// Lookup failures (`HabitNotFound`, `GoalNotFound`) mean nothing was changed.
/// `ConcurrentUpdateConflict` means the caller may retry the whole operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Habit not found: {0}")]
    HabitNotFound(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Goal {goal_id} was modified concurrently, retry the operation")]
    ConcurrentUpdateConflict { goal_id: String },

    #[error("Goal {goal_id} is not tickable yet, {} minute(s) remaining", minutes_rounded_up(.wait))]
    TooEarly { goal_id: String, wait: Duration },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Notification dispatch failed: {0}")]
    NotificationDispatch(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns true when the error reports a missing habit or goal.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::HabitNotFound(_)
                | Error::GoalNotFound(_)
                | Error::Database(DatabaseError::NotFound(_))
        )
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate goal name for a habit).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

/// Whole minutes, counting any started minute.
fn minutes_rounded_up(wait: &Duration) -> i64 {
    (wait.num_milliseconds().max(0) + 59_999) / 60_000
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
