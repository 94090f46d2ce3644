use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, AppState, UserDto};
use crate::domain::UserId;

/// `POST /users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.todo_service().create_user().await?;
    Ok(Json(UserDto::from(user)))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.todo_service().get_user(id).await?;
    Ok(Json(UserDto::from(user)))
}
