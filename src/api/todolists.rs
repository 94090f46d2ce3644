use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, CreateTodoListRequest, TodoDto, TodoListDto};
use crate::domain::TodoListId;

/// `POST /todolists`
pub async fn create_todolist(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTodoListRequest>,
) -> Result<Json<TodoListDto>, ApiError> {
    let list = state
        .todo_service()
        .create_todo_list(payload.user_id)
        .await?;
    Ok(Json(TodoListDto::from(list)))
}

/// `GET /todolists/{id}`
///
/// Lists with no todos and unknown ids both return an empty array.
pub async fn get_todolist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TodoListId>,
) -> Result<Json<Vec<TodoDto>>, ApiError> {
    let todos = state.todo_service().get_todo_list(id).await?;
    let dtos: Vec<TodoDto> = todos.into_iter().map(TodoDto::from).collect();
    Ok(Json(dtos))
}

/// `GET /todolists/slug/{slug}`
pub async fn get_todolist_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<TodoListDto>, ApiError> {
    let list = state.todo_service().find_todo_list_by_slug(&slug).await?;
    Ok(Json(TodoListDto::from(list)))
}
