//! In-memory store for tests
//!
//! Mirrors the observable behavior of [`super::pg::PgStore`] against the
//! reference schema: category references are checked on write, usernames
//! are unique, missing ids are reported as `NotFound`, and lists come back
//! ordered by id.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{CategoryStore, Store, TaskStore, UserStore};
use crate::error::{StoreError, StoreResult};
use crate::models::category::Category;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::User;

#[derive(Debug, Default)]
struct Tables {
    tasks: BTreeMap<i32, Task>,
    next_task_id: i32,
    users: BTreeMap<String, (User, String)>,
    next_user_id: i32,
}

/// Store that keeps everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: Vec<Category>,
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates a store seeded with the given categories
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        let mut categories: Vec<Category> = categories
            .into_iter()
            .map(|(id, title)| Category {
                id,
                title: title.into(),
            })
            .collect();
        categories.sort_by_key(|c| c.id);

        Self {
            categories,
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.tables.lock().await.users.len()
    }

    fn category_title(&self, id: i32) -> StoreResult<String> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.clone())
            .ok_or_else(|| {
                StoreError::Database(sqlx::Error::Protocol(format!(
                    "insert or update on table \"tasks\" violates foreign key constraint \"tasks_category_id_fkey\": category {} does not exist",
                    id
                )))
            })
    }

    async fn filter_tasks<F>(&self, keep: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool,
    {
        self.tables
            .lock()
            .await
            .tasks
            .values()
            .filter(|task| keep(*task))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.filter_tasks(|_| true).await)
    }

    async fn list_completed_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.filter_tasks(|task| task.completed).await)
    }

    async fn list_incomplete_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.filter_tasks(|task| !task.completed).await)
    }

    async fn list_tasks_in_category(&self, category_id: i32) -> StoreResult<Vec<Task>> {
        Ok(self.filter_tasks(|task| task.category_id == category_id).await)
    }

    async fn get_task(&self, id: i32) -> StoreResult<Task> {
        self.tables
            .lock()
            .await
            .tasks
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { entity: "task", id })
    }

    async fn create_task(&self, data: CreateTask) -> StoreResult<()> {
        let category = self.category_title(data.category_id)?;
        let now = Utc::now();

        let mut tables = self.tables.lock().await;
        tables.next_task_id += 1;
        let id = tables.next_task_id;
        tables.tasks.insert(
            id,
            Task {
                id,
                title: data.title,
                description: data.description,
                category_id: data.category_id,
                category,
                deadline: data.deadline,
                completed: false,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );

        Ok(())
    }

    async fn update_task(&self, data: UpdateTask) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        // A row that does not exist is never checked against the foreign key
        let task = tables.tasks.get_mut(&data.id).ok_or(StoreError::NotFound {
            entity: "task",
            id: data.id,
        })?;
        let category = self.category_title(data.category_id)?;

        task.title = data.title;
        task.description = data.description;
        task.category_id = data.category_id;
        task.category = category;
        task.deadline = data.deadline;
        task.updated_at = Some(Utc::now());

        Ok(())
    }

    async fn set_task_completed(&self, id: i32, completed: bool) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let task = tables
            .tasks
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "task", id })?;

        task.completed = completed;
        task.updated_at = Some(Utc::now());

        Ok(())
    }

    async fn delete_task(&self, id: i32) -> StoreResult<()> {
        let removed = self.tables.lock().await.tasks.remove(&id);
        StoreError::expect_single_row("task", id, u64::from(removed.is_some()))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut tables = self.tables.lock().await;

        if tables.users.contains_key(username) {
            return Err(StoreError::Conflict(
                "duplicate key value violates unique constraint \"users_username_key\"".to_string(),
            ));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
        };
        tables
            .users
            .insert(username.to_string(), (user.clone(), password_hash.to_string()));

        Ok(user)
    }

    async fn find_credentials(&self, username: &str) -> StoreResult<String> {
        self.tables
            .lock()
            .await
            .users
            .get(username)
            .map(|(_, hash)| hash.clone())
            .ok_or(StoreError::InvalidCredentials)
    }

    async fn get_public_user(&self, username: &str) -> StoreResult<User> {
        self.tables
            .lock()
            .await
            .users
            .get(username)
            .map(|(user, _)| user.clone())
            .ok_or(StoreError::InvalidCredentials)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
