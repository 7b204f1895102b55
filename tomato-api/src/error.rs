//! Error handling for the API server
//!
//! Handlers return `Result<T, ApiError>`. A failure is classified once,
//! where it is converted into `ApiError`, and the handler returns
//! immediately through `?`, so a request produces exactly one response.
//!
//! Every error body has the shape `{"error": "<message>"}`.
//!
//! # Example
//!
//! ```
//! use tomato_api::error::{ApiError, ApiResult};
//! use axum::Json;
//!
//! async fn handler() -> ApiResult<Json<String>> {
//!     Err(ApiError::NotFound("task with id 3 not found".to_string()))
//! }
//! ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tomato_shared::{
    error::StoreError,
    outcome::{classify, Outcome},
};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type, one variant per outcome class
#[derive(Debug)]
pub enum ApiError {
    /// Not acceptable (406) - unparseable or invalid payload
    MalformedInput(String),

    /// Unauthorized (401) - rejected credentials
    Unauthorized(String),

    /// Not found (404) - no task with the given id
    NotFound(String),

    /// Conflict (409) - e.g., taken username
    Conflict(String),

    /// Internal server error (500)
    Internal(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// Outcome class of this error
    pub fn outcome(&self) -> Outcome {
        match self {
            ApiError::MalformedInput(_) => Outcome::MalformedInput,
            ApiError::Unauthorized(_) => Outcome::Unauthorized,
            ApiError::NotFound(_) => Outcome::NotFound,
            ApiError::Conflict(_) => Outcome::Conflict,
            ApiError::Internal(_) => Outcome::Internal,
        }
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.outcome().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn message(&self) -> &str {
        match self {
            ApiError::MalformedInput(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let outcome = self.outcome();

        let message = if outcome.is_client_error() {
            tracing::warn!(outcome = %outcome, status = status.as_u16(), "{}", self.message());
            self.message().to_string()
        } else {
            // Log internal errors but don't expose details to clients
            tracing::error!(outcome = %outcome, "{}", self.message());
            "An internal error occurred".to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Convert store errors to API errors through the outcome classifier
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match classify(&err) {
            Outcome::MalformedInput => ApiError::MalformedInput(message),
            Outcome::Conflict => ApiError::Conflict(message),
            Outcome::Unauthorized => ApiError::Unauthorized(message),
            Outcome::NotFound => ApiError::NotFound(message),
            Outcome::Internal => ApiError::Internal(message),
        }
    }
}

/// Any JSON body that cannot be read is malformed input
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedInput(rejection.body_text())
    }
}

/// Convert validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        messages.sort();

        ApiError::MalformedInput(messages.join("; "))
    }
}
