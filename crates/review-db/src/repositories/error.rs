//! Error handling utilities for repositories

use review_core::error::DomainError;
use review_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

/// Why a versioned write touched no rows.
pub fn stale_write(id: Snowflake, still_exists: bool) -> DomainError {
    if still_exists {
        DomainError::ConcurrencyConflict(id)
    } else {
        DomainError::ReviewNotFound(id)
    }
}
