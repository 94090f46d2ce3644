//! Domain service for users, todo lists and todos.
//!
//! Every operation that takes a foreign id validates it against the store
//! before writing, since the schema carries no foreign keys.

use thiserror::Error;

use crate::domain::{EntityKind, TodoId, TodoListId, UserId};
use crate::models::{NewTodo, Todo, TodoList, User};
use crate::services::identifiers::IdentifierError;

/// Errors surfaced by [`TodoService`].
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Todo list not found: {0}")]
    TodoListNotFound(String),

    #[error("Invalid {entity} reference: {id}")]
    InvalidReference { entity: EntityKind, id: i32 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidReference,
    Internal,
}

impl TodoError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) | Self::TodoListNotFound(_) => ErrorKind::NotFound,
            Self::InvalidReference { .. } => ErrorKind::InvalidReference,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn invalid_user(id: UserId) -> Self {
        Self::InvalidReference {
            entity: EntityKind::User,
            id: id.value(),
        }
    }

    pub fn invalid_todolist(id: TodoListId) -> Self {
        Self::InvalidReference {
            entity: EntityKind::TodoList,
            id: id.value(),
        }
    }
}

impl From<sea_orm::DbErr> for TodoError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

// Repository calls are the only source of `anyhow` errors here.
impl From<anyhow::Error> for TodoError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<IdentifierError> for TodoError {
    fn from(err: IdentifierError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for the board.
///
/// # Examples
///
/// ```rust,ignore
/// use todoboard::services::{TodoService, TodoError};
/// use std::sync::Arc;
///
/// async fn example(service: Arc<dyn TodoService>) -> Result<(), TodoError> {
///     let user = service.create_user().await?;
///     let list = service.create_todo_list(user.id).await?;
///     let todos = service.get_todo_list(list.id).await?;
///     assert!(todos.is_empty());
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait TodoService: Send + Sync {
    /// Creates a user with a freshly generated username.
    async fn create_user(&self) -> Result<User, TodoError>;

    /// # Errors
    ///
    /// - Returns [`TodoError::UserNotFound`] if no user has this id
    /// - Returns [`TodoError::Database`] on connection failures
    async fn get_user(&self, id: UserId) -> Result<User, TodoError>;

    /// Creates a list owned by `user_id` and makes it that user's last used list.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidReference`] if the user does not exist; no
    /// list is written in that case.
    async fn create_todo_list(&self, user_id: UserId) -> Result<TodoList, TodoError>;

    /// Todos of a list with their authors' current usernames. Unknown lists
    /// yield an empty vector.
    async fn get_todo_list(&self, id: TodoListId) -> Result<Vec<Todo>, TodoError>;

    /// Resolves a sharing slug to its list.
    async fn find_todo_list_by_slug(&self, slug: &str) -> Result<TodoList, TodoError>;

    /// # Errors
    ///
    /// Returns [`TodoError::InvalidReference`] if the list or the user does not
    /// exist. The list is checked first.
    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, TodoError>;

    /// Moves a todo to `column`. Unknown ids are a silent no-op.
    async fn update_todo_column(
        &self,
        id: TodoId,
        column: &str,
        last_updated: &str,
    ) -> Result<(), TodoError>;

    /// Deletes a todo. Unknown ids are a silent no-op.
    async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError>;
}
