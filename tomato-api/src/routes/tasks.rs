//! Task endpoints
//!
//! # Endpoints
//!
//! | Method     | Path                   | Body                                                  | Success body            |
//! |------------|------------------------|-------------------------------------------------------|-------------------------|
//! | GET, POST  | `/alltasks`            | -                                                     | `[Task]`                |
//! | GET        | `/completedtasks`      | -                                                     | `[Task]`                |
//! | GET        | `/incompletetasks`     | -                                                     | `[Task]`                |
//! | POST       | `/gettask`             | `{id}`                                                | `Task`                  |
//! | POST       | `/gettaskbycategoryid` | `{category_id}`                                       | `[Task]`                |
//! | POST       | `/addtask`             | `{title, description, category_id, deadline?}`        | empty                   |
//! | POST       | `/updatetask`          | `{id, title, description, category_id, deadline?}`    | JSON confirmation       |
//! | POST       | `/completetask`        | `{id}`                                                | JSON confirmation       |
//! | POST       | `/incompletetask`      | `{id}`                                                | JSON confirmation       |
//! | POST       | `/deletetask`          | `{id}`                                                | text confirmation       |

use crate::{app::AppState, error::ApiResult, extract::JsonBody};
use axum::{extract::State, http::StatusCode, Json};
use tomato_shared::{
    models::task::{CategoryFilter, CreateTask, Task, TaskId, UpdateTask},
    store::TaskStore,
};

/// Lists every task
pub async fn all_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.store.list_tasks().await?))
}

/// Lists completed tasks
pub async fn completed_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.store.list_completed_tasks().await?))
}

/// Lists incomplete tasks
pub async fn incomplete_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.store.list_incomplete_tasks().await?))
}

/// Fetches one task by id
///
/// # Errors
///
/// - `404 Not Found`: No task with this id
pub async fn get_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskId>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.store.get_task(params.id).await?))
}

/// Lists the tasks in a category; an unknown category yields `[]`
pub async fn tasks_by_category(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CategoryFilter>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.store.list_tasks_in_category(params.category_id).await?))
}

/// Adds a task
///
/// # Errors
///
/// - `500 Internal Server Error`: Unknown category or any store failure
pub async fn add_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<CreateTask>,
) -> ApiResult<StatusCode> {
    state.store.create_task(params).await?;
    Ok(StatusCode::OK)
}

/// Overwrites a task
pub async fn update_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<UpdateTask>,
) -> ApiResult<Json<String>> {
    let id = params.id;
    state.store.update_task(params).await?;

    Ok(Json(format!("Successfully updated task with id: {}", id)))
}

/// Marks a task as completed
pub async fn complete_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskId>,
) -> ApiResult<Json<String>> {
    state.store.set_task_completed(params.id, true).await?;

    Ok(Json(format!("Successfully completed task with id: {}", params.id)))
}

/// Marks a task as incomplete
pub async fn incomplete_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskId>,
) -> ApiResult<Json<String>> {
    state.store.set_task_completed(params.id, false).await?;

    Ok(Json(format!(
        "Successfully marked task as incomplete with id: {}",
        params.id
    )))
}

/// Deletes a task
///
/// # Errors
///
/// - `404 Not Found`: No task with this id; deleting twice is not a no-op
pub async fn delete_task(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TaskId>,
) -> ApiResult<String> {
    state.store.delete_task(params.id).await?;

    Ok(format!("Successfully deleted task with id: {}", params.id))
}
