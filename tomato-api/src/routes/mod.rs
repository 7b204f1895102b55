//! API route handlers
//!
//! Handlers are thin: parse the body, call one store or account operation,
//! serialize the result. Failures leave through `?` as [`crate::error::ApiError`].
//!
//! - `health`: Liveness and database health
//! - `auth`: Signup and login
//! - `tasks`: Task queries and mutations
//! - `categories`: Category listing

pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;
