use serde::{Deserialize, Serialize};

use crate::domain::{TodoId, TodoListId, UserId};
use crate::models::{Todo, TodoList, User};

/// Body of every error response. Successful responses carry the bare
/// resource, as the board client reads them.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub username: String,
    #[serde(rename = "lastUsedTodolistId")]
    pub last_used_todolist_id: Option<TodoListId>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            last_used_todolist_id: user.last_used_todolist_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoListDto {
    pub id: TodoListId,
    pub user_id: UserId,
    pub slug: String,
}

impl From<TodoList> for TodoListDto {
    fn from(list: TodoList) -> Self {
        Self {
            id: list.id,
            user_id: list.user_id,
            slug: list.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoDto {
    pub id: TodoId,
    pub title: String,
    pub user_id: UserId,
    pub todolist_id: TodoListId,
    pub creator: String,
    pub column: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            user_id: todo.user_id,
            todolist_id: todo.todolist_id,
            creator: todo.creator,
            column: todo.column,
            last_updated: todo.last_updated,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoListRequest {
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub user_id: UserId,
    pub todolist_id: TodoListId,
    pub column: String,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<String>,
}

/// Body of `POST /todos/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoColumnRequest {
    pub id: TodoId,
    pub column: String,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<String>,
}

/// Body of `PUT /todos/{id}`. An `id` field in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct MoveTodoRequest {
    pub column: String,
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<String>,
}
