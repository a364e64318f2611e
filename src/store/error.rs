//! Error types for price store operations.

use std::fmt;

use thiserror::Error;

/// Structured classification for store/database failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// `SQLite` returned busy/locked.
    BusyOrLocked,
    /// Constraint failure (unique/check/not-null).
    ConstraintViolation,
    /// Connection pool timed out waiting for a free connection.
    PoolTimeout,
    /// Connection pool is closed.
    PoolClosed,
    /// Filesystem or transport IO failure.
    Io,
    /// Unclassified database failure.
    Other,
}

impl StoreErrorKind {
    /// True for contention that may clear on a later run.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::BusyOrLocked | Self::PoolTimeout)
    }

    #[must_use]
    pub fn from_sqlx(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => Self::PoolTimeout,
            sqlx::Error::PoolClosed => Self::PoolClosed,
            sqlx::Error::Io(_) => Self::Io,
            sqlx::Error::Database(database_error) => {
                classify_database_error(database_error.as_ref())
            }
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BusyOrLocked => "busy_or_locked",
            Self::ConstraintViolation => "constraint_violation",
            Self::PoolTimeout => "pool_timeout",
            Self::PoolClosed => "pool_closed",
            Self::Io => "io",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}

fn classify_database_error(
    database_error: &(dyn sqlx::error::DatabaseError + 'static),
) -> StoreErrorKind {
    let code = database_error.code();
    if matches!(
        code.as_deref(),
        Some("SQLITE_BUSY" | "SQLITE_LOCKED" | "5" | "6")
    ) {
        return StoreErrorKind::BusyOrLocked;
    }

    if database_error.is_unique_violation()
        || database_error.is_check_violation()
        || code
            .as_deref()
            .is_some_and(|value| value.starts_with("SQLITE_CONSTRAINT"))
    {
        return StoreErrorKind::ConstraintViolation;
    }

    let message = database_error.message().to_ascii_lowercase();
    if message.contains("database is locked") || message.contains("database is busy") {
        return StoreErrorKind::BusyOrLocked;
    }

    StoreErrorKind::Other
}

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error ({kind}): {message}")]
    Database {
        /// Typed classification of the failure.
        kind: StoreErrorKind,
        /// Human-readable database error text.
        message: String,
    },

    /// The record failed validation and was not written.
    #[error("invalid price record: {reason}")]
    InvalidRecord {
        /// Why the record was rejected.
        reason: String,
    },

    /// A stored timestamp could not be read back.
    #[error("corrupt timestamp '{value}' in row {id}")]
    CorruptTimestamp {
        /// Row id.
        id: i64,
        /// Stored text.
        value: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database {
            kind: StoreErrorKind::from_sqlx(&err),
            message: err.to_string(),
        }
    }
}

impl StoreError {
    /// Creates an `InvalidRecord` error.
    #[must_use]
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Returns the typed database error kind, when this is a database error.
    #[must_use]
    pub fn database_kind(&self) -> Option<StoreErrorKind> {
        match self {
            Self::Database { kind, .. } => Some(*kind),
            Self::InvalidRecord { .. } | Self::CorruptTimestamp { .. } => None,
        }
    }

    /// Kind recorded on log events; non-database errors count as `other`.
    #[must_use]
    pub fn log_kind(&self) -> StoreErrorKind {
        self.database_kind().unwrap_or(StoreErrorKind::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_database_message() {
        let err = StoreError::Database {
            kind: StoreErrorKind::Other,
            message: "disk I/O error".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("database error"));
        assert!(msg.contains("other"));
        assert!(msg.contains("disk I/O error"));
    }

    #[test]
    fn test_store_error_from_pool_closed() {
        let err = StoreError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.database_kind(), Some(StoreErrorKind::PoolClosed));
    }

    #[test]
    fn test_store_error_invalid_record_has_no_db_kind() {
        let err = StoreError::invalid_record("price must be positive");
        assert!(err.to_string().contains("price must be positive"));
        assert_eq!(err.database_kind(), None);
        assert_eq!(err.log_kind(), StoreErrorKind::Other);
    }

    #[test]
    fn test_transient_kinds() {
        assert!(StoreErrorKind::BusyOrLocked.is_transient());
        assert!(StoreErrorKind::PoolTimeout.is_transient());
        assert!(!StoreErrorKind::PoolClosed.is_transient());
        assert!(!StoreErrorKind::ConstraintViolation.is_transient());

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.log_kind(), StoreErrorKind::PoolTimeout);
        assert_eq!(err.log_kind().to_string(), "pool_timeout");
    }
}
