//! Todo handlers
//!
//! Endpoints for creating, reading, updating and deleting todos.
//! Inputs arrive already validated by the extractors; a todo that does not
//! exist is reported as a successful response without `data`.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::domain::entities::{NewTodo, Todo, TodoChanges};
use crate::error::AppError;
use crate::validation::{TodoIdParam, Validated};
use crate::AppState;

pub const ALL_DELETED_MESSAGE: &str = "All todos deleted successfully.";

/// Uniform success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self::maybe(Some(data))
    }

    /// `None` leaves `data` out of the body entirely
    pub fn maybe(data: Option<T>) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// GET /todo
///
/// List all todos in insertion order.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Todo>>>, AppError> {
    let todos = state.todo_service.get_all().await?;
    Ok(Json(ApiResponse::data(todos)))
}

/// GET /todo/:id
pub async fn get_todo(
    State(state): State<AppState>,
    TodoIdParam(id): TodoIdParam,
) -> Result<Json<ApiResponse<Todo>>, AppError> {
    let todo = state.todo_service.get_detail(&id).await?;
    Ok(Json(ApiResponse::maybe(todo)))
}

/// POST /todo
///
/// Create a todo. Responds 201 with the stored record.
pub async fn create_todo(
    State(state): State<AppState>,
    Validated(new_todo): Validated<NewTodo>,
) -> Result<(StatusCode, Json<ApiResponse<Todo>>), AppError> {
    let todo = state.todo_service.create(new_todo).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::data(todo))))
}

/// PUT /todo/:id
///
/// Partial update; fields left out of the body keep their values.
pub async fn update_todo(
    State(state): State<AppState>,
    TodoIdParam(id): TodoIdParam,
    Validated(changes): Validated<TodoChanges>,
) -> Result<Json<ApiResponse<Todo>>, AppError> {
    let todo = state.todo_service.update(&id, &changes).await?;
    Ok(Json(ApiResponse::maybe(todo)))
}

/// DELETE /todo/:id
///
/// Responds with the removed todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    TodoIdParam(id): TodoIdParam,
) -> Result<Json<ApiResponse<Todo>>, AppError> {
    let todo = state.todo_service.remove(&id).await?;
    Ok(Json(ApiResponse::maybe(todo)))
}

/// DELETE /todo
pub async fn delete_all_todos(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.todo_service.remove_all().await?;
    Ok(Json(ApiResponse::message(ALL_DELETED_MESSAGE)))
}
