//! User model and database operations
//!
//! Users are created once at signup and never modified afterwards.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id SERIAL PRIMARY KEY,
//!     username TEXT NOT NULL UNIQUE,
//!     password TEXT NOT NULL
//! );
//! ```
//!
//! The `password` column holds the PHC-formatted hash, never the plaintext.

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use validator::Validate;

/// Public user record
///
/// This is everything a client ever sees about a user; the password hash
/// stays inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned id
    pub id: i32,

    /// Unique, case-sensitive username
    pub username: String,
}

/// Signup and login payload
#[derive(Clone, Deserialize, Validate)]
pub struct Credentials {
    /// Username
    #[validate(length(min = 1, max = 255, message = "Username must be 1 to 255 characters"))]
    pub username: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl User {
    /// Inserts a user and returns its public record
    ///
    /// # Errors
    ///
    /// Returns an error if the username already exists (unique constraint
    /// violation) or the statement fails.
    pub async fn create(
        conn: &mut PgConnection,
        username: &str,
        password_hash: &str,
    ) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await?;

        Ok(user)
    }

    /// Looks up the stored password hash for a username
    pub async fn find_password_hash(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let hash: Option<(String,)> =
            sqlx::query_as("SELECT password FROM users WHERE username = $1")
                .bind(username)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(hash.map(|(hash,)| hash))
    }

    /// Finds the public record for a username
    pub async fn find_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(user)
    }
}
