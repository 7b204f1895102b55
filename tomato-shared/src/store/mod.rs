//! Store interfaces
//!
//! Handlers depend on these traits, not on PostgreSQL. Each method is one
//! atomic unit of work against the backing store; none of them take a
//! transaction and none retry.
//!
//! # Implementations
//!
//! - [`pg::PgStore`]: opens a connection per call (see [`crate::db`])
//! - `memory::MemoryStore`: in-process implementation for tests, behind the
//!   `test-util` feature
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tomato_shared::db::connection::{Database, DatabaseConfig};
//! use tomato_shared::store::{pg::PgStore, Store};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(&DatabaseConfig {
//!     url: std::env::var("DATABASE_URL")?,
//!     ..Default::default()
//! })?;
//! let store: Arc<dyn Store> = Arc::new(PgStore::new(db));
//!
//! for task in store.list_tasks().await? {
//!     println!("{} [{}]", task.title, task.category);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::category::Category;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::User;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod pg;

/// Task reads and writes
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks with their category title
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Tasks whose `completed` flag is set
    async fn list_completed_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Tasks whose `completed` flag is clear
    async fn list_incomplete_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Tasks in one category; empty if the category has none or does not exist
    async fn list_tasks_in_category(&self, category_id: i32) -> StoreResult<Vec<Task>>;

    /// A single task
    ///
    /// Fails with `StoreError::NotFound` if no task has this id.
    async fn get_task(&self, id: i32) -> StoreResult<Task>;

    /// Inserts one task
    ///
    /// The category must exist. Anything but exactly one inserted row is a failure.
    async fn create_task(&self, data: CreateTask) -> StoreResult<()>;

    /// Overwrites every writable field of a task
    async fn update_task(&self, data: UpdateTask) -> StoreResult<()>;

    /// Sets or clears the `completed` flag; repeating the same value is not an error
    async fn set_task_completed(&self, id: i32, completed: bool) -> StoreResult<()>;

    /// Deletes a task
    ///
    /// Deleting an id that does not exist fails rather than succeeding silently.
    async fn delete_task(&self, id: i32) -> StoreResult<()>;
}

/// Read-only category listing
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Every category
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
}

/// Account rows
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user; a taken username fails with `StoreError::Conflict`
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User>;

    /// Stored password hash for a username
    ///
    /// An unknown username fails with `StoreError::InvalidCredentials`.
    async fn find_credentials(&self, username: &str) -> StoreResult<String>;

    /// Public record for a username
    async fn get_public_user(&self, username: &str) -> StoreResult<User>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: TaskStore + CategoryStore + UserStore {
    /// Checks that the backing store answers
    async fn health_check(&self) -> StoreResult<()>;
}
