//! Task model and database operations
//!
//! Reads go through the set-returning functions installed alongside the
//! schema, which join in the category title. Writes hit the `tasks`
//! relation directly and report how many rows they touched so the store
//! can insist on exactly one.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id SERIAL PRIMARY KEY,
//!     category_id INTEGER NOT NULL REFERENCES categories(id),
//!     title TEXT NOT NULL,
//!     description TEXT NOT NULL DEFAULT '',
//!     deadline TIMESTAMPTZ,
//!     completed BOOLEAN NOT NULL DEFAULT FALSE,
//!     created_at TIMESTAMPTZ DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ DEFAULT NOW()
//! );
//!
//! -- each returns (id, title, description, category_id, category_title,
//! --               deadline, completed, created_at, updated_at)
//! get_all_tasks()
//! get_completed_tasks()
//! get_incomplete_tasks()
//! get_tasks_in_category(category_id INTEGER)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use super::deserialize_id;

/// A to-do item with its category title joined in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Store-assigned id
    pub id: i32,

    pub title: String,

    pub description: String,

    /// Category this task belongs to
    pub category_id: i32,

    /// Title of the category, derived at read time
    #[sqlx(rename = "category_title")]
    pub category: String,

    /// Optional due date
    pub deadline: Option<DateTime<Utc>>,

    pub completed: bool,

    /// Set by the store on insert
    pub created_at: Option<DateTime<Utc>>,

    /// Maintained by the store
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,

    pub description: String,

    /// Must reference an existing category; accepts `1` or `"1"`
    #[serde(deserialize_with = "deserialize_id")]
    pub category_id: i32,

    /// Absent and `null` both mean "no deadline"
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// Input for a full-row task update
///
/// Every field is written. Callers resend the current value of anything
/// they do not mean to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    pub id: i32,

    pub title: String,

    pub description: String,

    #[serde(deserialize_with = "deserialize_id")]
    pub category_id: i32,

    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
}

/// Payload naming a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskId {
    pub id: i32,
}

/// Payload naming a category to filter tasks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    #[serde(deserialize_with = "deserialize_id")]
    pub category_id: i32,
}

impl Task {
    /// Lists every task
    pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, category_id, category_title,
                   deadline, completed, created_at, updated_at
            FROM get_all_tasks()
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks whose `completed` flag is set
    pub async fn list_completed(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, category_id, category_title,
                   deadline, completed, created_at, updated_at
            FROM get_completed_tasks()
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks whose `completed` flag is clear
    pub async fn list_incomplete(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, category_id, category_title,
                   deadline, completed, created_at, updated_at
            FROM get_incomplete_tasks()
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Lists tasks in a category
    ///
    /// An unknown category simply has no tasks.
    pub async fn list_in_category(
        conn: &mut PgConnection,
        category_id: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, category_id, category_title,
                   deadline, completed, created_at, updated_at
            FROM get_tasks_in_category($1)
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(tasks)
    }

    /// Finds a task by id
    pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, category_id, category_title,
                   deadline, completed, created_at, updated_at
            FROM get_all_tasks()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(task)
    }

    /// Inserts a task, returning the number of rows inserted
    ///
    /// # Errors
    ///
    /// Fails with a foreign key violation if `category_id` does not exist.
    pub async fn create(conn: &mut PgConnection, data: &CreateTask) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (category_id, title, description, deadline)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(data.category_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.deadline)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Overwrites every writable field of a task, returning the number of rows updated
    pub async fn update(conn: &mut PgConnection, data: &UpdateTask) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET category_id = $1, title = $2, description = $3, deadline = $4
            WHERE id = $5
            "#,
        )
        .bind(data.category_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.deadline)
        .bind(data.id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Sets the `completed` flag, returning the number of rows updated
    ///
    /// Setting the flag to its current value still counts the row.
    pub async fn set_completed(
        conn: &mut PgConnection,
        id: i32,
        completed: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET completed = $1 WHERE id = $2")
            .bind(completed)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a task, returning the number of rows deleted
    pub async fn delete(conn: &mut PgConnection, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
