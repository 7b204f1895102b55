//! PostgreSQL store
//!
//! Every method follows the same shape: open a connection, run one model
//! statement under the operation deadline, release the connection, then
//! interpret the result. Nothing is cached between calls.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{CategoryStore, Store, TaskStore, UserStore};
use crate::db::connection::Database;
use crate::error::{StoreError, StoreResult};
use crate::models::category::Category;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::User;

/// Store backed by PostgreSQL, one connection per call
#[derive(Debug, Clone)]
pub struct PgStore {
    db: Database,
}

impl PgStore {
    /// Creates a store over the given connection source
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskStore for PgStore {
    #[instrument(skip(self))]
    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::list_all(&mut conn)).await;
        self.db.release(conn, &result).await;
        result
    }

    #[instrument(skip(self))]
    async fn list_completed_tasks(&self) -> StoreResult<Vec<Task>> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::list_completed(&mut conn)).await;
        self.db.release(conn, &result).await;
        result
    }

    #[instrument(skip(self))]
    async fn list_incomplete_tasks(&self) -> StoreResult<Vec<Task>> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::list_incomplete(&mut conn)).await;
        self.db.release(conn, &result).await;
        result
    }

    #[instrument(skip(self))]
    async fn list_tasks_in_category(&self, category_id: i32) -> StoreResult<Vec<Task>> {
        let mut conn = self.db.connect().await?;
        let result = self
            .db
            .within_deadline(Task::list_in_category(&mut conn, category_id))
            .await;
        self.db.release(conn, &result).await;
        result
    }

    #[instrument(skip(self))]
    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::find_by_id(&mut conn, id)).await;
        self.db.release(conn, &result).await;

        result?.ok_or(StoreError::NotFound { entity: "task", id })
    }

    #[instrument(skip(self, data), fields(title = %data.title, category_id = data.category_id))]
    async fn create_task(&self, data: CreateTask) -> StoreResult<()> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::create(&mut conn, &data)).await;
        self.db.release(conn, &result).await;

        match result? {
            1 => {
                debug!("Task created");
                Ok(())
            }
            actual => Err(StoreError::RowsAffected {
                expected: 1,
                actual,
            }),
        }
    }

    #[instrument(skip(self, data), fields(id = data.id))]
    async fn update_task(&self, data: UpdateTask) -> StoreResult<()> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::update(&mut conn, &data)).await;
        self.db.release(conn, &result).await;

        StoreError::expect_single_row("task", data.id, result?)
    }

    #[instrument(skip(self))]
    async fn set_task_completed(&self, id: i32, completed: bool) -> StoreResult<()> {
        let mut conn = self.db.connect().await?;
        let result = self
            .db
            .within_deadline(Task::set_completed(&mut conn, id, completed))
            .await;
        self.db.release(conn, &result).await;

        StoreError::expect_single_row("task", id, result?)
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: i32) -> StoreResult<()> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Task::delete(&mut conn, id)).await;
        self.db.release(conn, &result).await;

        StoreError::expect_single_row("task", id, result?)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut conn = self.db.connect().await?;
        let result = self.db.within_deadline(Category::list_all(&mut conn)).await;
        self.db.release(conn, &result).await;
        result
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self, password_hash))]
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut conn = self.db.connect().await?;
        let result = self
            .db
            .within_deadline(async {
                User::create(&mut conn, username, password_hash)
                    .await
                    .map_err(StoreError::from_insert)
            })
            .await;
        self.db.release(conn, &result).await;
        result
    }

    #[instrument(skip(self))]
    async fn find_credentials(&self, username: &str) -> StoreResult<String> {
        let mut conn = self.db.connect().await?;
        let result = self
            .db
            .within_deadline(User::find_password_hash(&mut conn, username))
            .await;
        self.db.release(conn, &result).await;

        result?.ok_or(StoreError::InvalidCredentials)
    }

    #[instrument(skip(self))]
    async fn get_public_user(&self, username: &str) -> StoreResult<User> {
        let mut conn = self.db.connect().await?;
        let result = self
            .db
            .within_deadline(User::find_by_username(&mut conn, username))
            .await;
        self.db.release(conn, &result).await;

        result?.ok_or(StoreError::InvalidCredentials)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.db.health_check().await
    }
}
