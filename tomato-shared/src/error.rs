//! Store error type
//!
//! Every store operation returns `Result<T, StoreError>`. The variants
//! record *what* went wrong at the point of the failing call; turning that
//! into a client-visible class is the job of [`crate::outcome`].

use std::time::Duration;

use crate::auth::password::PasswordError;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (e.g. a taken username)
    ///
    /// Carries the backing store's message.
    #[error("{0}")]
    Conflict(String),

    /// Unknown username or wrong password
    ///
    /// Both cases share this variant so callers cannot tell them apart.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No row matched the given id
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Kind of record that was looked up
        entity: &'static str,
        /// Id that was looked up
        id: i32,
    },

    /// A write touched a different number of rows than the single one expected
    #[error("expected {expected} row(s) to be affected, got {actual}")]
    RowsAffected {
        /// Rows the operation must touch
        expected: u64,
        /// Rows it actually touched
        actual: u64,
    },

    /// The connection or the statement did not finish within its deadline
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Any other driver or database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Hashing or verifying a password failed for a reason other than mismatch
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl StoreError {
    /// Maps a driver error raised by an insert, turning unique violations into `Conflict`
    pub fn from_insert(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::Conflict(db_err.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }

    /// Checks that a statement touched exactly one row
    ///
    /// Zero rows means the targeted record does not exist. Anything else is
    /// reported as a row-count mismatch.
    pub fn expect_single_row(entity: &'static str, id: i32, affected: u64) -> StoreResult<()> {
        match affected {
            1 => Ok(()),
            0 => Err(StoreError::NotFound { entity, id }),
            actual => Err(StoreError::RowsAffected {
                expected: 1,
                actual,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_single_row() {
        assert!(StoreError::expect_single_row("task", 1, 1).is_ok());

        match StoreError::expect_single_row("task", 7, 0) {
            Err(StoreError::NotFound { entity, id }) => {
                assert_eq!(entity, "task");
                assert_eq!(id, 7);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }

        match StoreError::expect_single_row("task", 7, 3) {
            Err(StoreError::RowsAffected { expected, actual }) => {
                assert_eq!(expected, 1);
                assert_eq!(actual, 3);
            }
            other => panic!("expected RowsAffected, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound { entity: "task", id: 42 };
        assert_eq!(err.to_string(), "task with id 42 not found");

        let err = StoreError::InvalidCredentials;
        assert_eq!(err.to_string(), "invalid username or password");

        let err = StoreError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "store operation timed out after 5s");
    }

    #[test]
    fn test_non_database_insert_error_is_internal() {
        let err = StoreError::from_insert(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
