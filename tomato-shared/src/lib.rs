//! # Tomato Shared Library
//!
//! This crate contains the data-access layer of the Tomato task tracker:
//! the records exchanged with clients, the stores that talk to PostgreSQL,
//! and the policy that turns store failures into client-visible outcomes.
//!
//! ## Module Organization
//!
//! - `models`: Users, categories, tasks and their request parameter records
//! - `auth`: Password hashing and the signup/login flows
//! - `db`: Per-call PostgreSQL connections with connect and operation deadlines
//! - `store`: Store interfaces and their PostgreSQL implementation
//! - `error`: The store error type
//! - `outcome`: Classification of store errors into outcome classes

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod outcome;
pub mod store;

/// Current version of the Tomato shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
