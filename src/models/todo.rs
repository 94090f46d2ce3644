use crate::domain::{TodoId, TodoListId, UserId};
use crate::entities::todos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub user_id: UserId,
    pub todolist_id: TodoListId,
    pub creator: String,
    /// Freeform kanban stage such as `todo`, `ongoing` or `done`.
    pub column: String,
    pub last_updated: String,
}

impl From<todos::Model> for Todo {
    fn from(model: todos::Model) -> Self {
        Self {
            id: TodoId::new(model.id),
            title: model.title,
            user_id: UserId::new(model.user_id),
            todolist_id: TodoListId::new(model.todolist_id),
            creator: model.creator,
            column: model.column,
            last_updated: model.last_updated,
        }
    }
}

/// Caller-supplied fields for a new todo. `creator` and `id` are filled in by
/// the service.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub user_id: UserId,
    pub todolist_id: TodoListId,
    pub column: String,
    /// Defaults to the current UTC time when absent.
    pub last_updated: Option<String>,
}
