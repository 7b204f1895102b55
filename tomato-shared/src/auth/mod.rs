//! Credential handling
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and verification
//! - [`accounts`]: Signup and login flows over a [`crate::store::UserStore`]
//!
//! No tokens are issued: a successful login returns the public user record
//! and nothing else.
//!
//! # Example
//!
//! ```
//! use tomato_shared::auth::password::{hash_password, verify_password};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("user_password")?;
//! assert!(verify_password("user_password", &hash)?);
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod password;
