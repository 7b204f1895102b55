//! Outcome classification
//!
//! Maps any failure produced while handling a request onto one of a small
//! set of client-visible classes. Every class other than success ends the
//! request: callers propagate the error with `?` and write exactly one
//! response.
//!
//! | Failure                                  | Outcome          | Status |
//! |------------------------------------------|------------------|--------|
//! | unparseable or invalid request payload   | `MalformedInput` | 406    |
//! | username uniqueness violation on signup  | `Conflict`       | 409    |
//! | unknown user or wrong password on login  | `Unauthorized`   | 401    |
//! | targeted task id does not exist          | `NotFound`       | 404    |
//! | anything else (driver, timeout, hashing) | `Internal`       | 500    |

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Client-visible class of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The request payload could not be parsed or failed validation
    MalformedInput,

    /// The write collided with an existing record
    Conflict,

    /// Credentials were rejected
    Unauthorized,

    /// The record addressed by id does not exist
    NotFound,

    /// Any other failure
    Internal,
}

impl Outcome {
    /// HTTP status code equivalent of this outcome
    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::MalformedInput => 406,
            Outcome::Conflict => 409,
            Outcome::Unauthorized => 401,
            Outcome::NotFound => 404,
            Outcome::Internal => 500,
        }
    }

    /// Stable lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::MalformedInput => "malformed_input",
            Outcome::Conflict => "conflict",
            Outcome::Unauthorized => "unauthorized",
            Outcome::NotFound => "not_found",
            Outcome::Internal => "internal",
        }
    }

    /// Whether the failure is attributable to the client
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Outcome::Internal)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a store failure
pub fn classify(err: &StoreError) -> Outcome {
    match err {
        StoreError::Conflict(_) => Outcome::Conflict,
        StoreError::InvalidCredentials => Outcome::Unauthorized,
        StoreError::NotFound { .. } => Outcome::NotFound,
        StoreError::RowsAffected { .. }
        | StoreError::Timeout(_)
        | StoreError::Database(_)
        | StoreError::Password(_) => Outcome::Internal,
    }
}

impl From<&StoreError> for Outcome {
    fn from(err: &StoreError) -> Self {
        classify(err)
    }
}
