use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    ApiError, AppState, CreateTodoRequest, MoveTodoRequest, TodoDto,
    UpdateTodoColumnRequest,
};
use crate::domain::TodoId;
use crate::models::NewTodo;

fn timestamp_or_now(last_updated: Option<String>) -> String {
    last_updated.unwrap_or_else(|| chrono::Utc::now().to_rfc3339())
}

/// `POST /todos`
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTodoRequest>,
) -> Result<Json<TodoDto>, ApiError> {
    let todo = state
        .todo_service()
        .create_todo(NewTodo {
            title: payload.title,
            user_id: payload.user_id,
            todolist_id: payload.todolist_id,
            column: payload.column,
            last_updated: payload.last_updated,
        })
        .await?;

    Ok(Json(TodoDto::from(todo)))
}

/// `POST /todos/update`
pub async fn update_todo_column(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateTodoColumnRequest>,
) -> Result<StatusCode, ApiError> {
    let last_updated = timestamp_or_now(payload.last_updated);
    state
        .todo_service()
        .update_todo_column(payload.id, &payload.column, &last_updated)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /todos/{id}`
pub async fn move_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TodoId>,
    Json(payload): Json<MoveTodoRequest>,
) -> Result<StatusCode, ApiError> {
    let last_updated = timestamp_or_now(payload.last_updated);
    state
        .todo_service()
        .update_todo_column(id, &payload.column, &last_updated)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /todos/{id}`
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, ApiError> {
    state.todo_service().delete_todo(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
