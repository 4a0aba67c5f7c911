//! Database error types for revu-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or a row could not be parsed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A uniqueness constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Detect a SQLite uniqueness violation.
///
/// libSQL surfaces constraint failures only through the message text.
pub fn is_unique_violation(e: &libsql::Error) -> bool {
    e.to_string().contains("UNIQUE constraint failed")
}

/// Convert a libSQL error, mapping uniqueness violations to `Conflict`.
pub(crate) fn classify(e: libsql::Error, what: &str) -> DatabaseError {
    if is_unique_violation(&e) {
        DatabaseError::Conflict(format!("{what}: {e}"))
    } else {
        DatabaseError::LibSql(e)
    }
}
