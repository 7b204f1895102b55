//! Request extractors
//!
//! [`JsonBody`] behaves like `axum::Json` but rejects unreadable bodies
//! (bad syntax, wrong shape, missing content type) with a 406 and the
//! standard `{"error": ..}` body instead of axum's plain-text rejection.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON request body whose rejection is [`ApiError::MalformedInput`]
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
