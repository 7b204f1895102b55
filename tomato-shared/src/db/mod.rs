//! Database access for Tomato
//!
//! There is no connection pool: every store operation opens its own
//! connection, runs one statement under a deadline, and closes the
//! connection again whether the statement succeeded or not.
//!
//! # Example
//!
//! ```no_run
//! use tomato_shared::db::connection::{Database, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: std::env::var("DATABASE_URL")?,
//!         ..Default::default()
//!     };
//!
//!     let db = Database::new(&config)?;
//!     db.health_check().await?;
//!     Ok(())
//! }
//! ```

pub mod connection;
