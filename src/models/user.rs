use crate::domain::{TodoListId, UserId};
use crate::entities::users;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub last_used_todolist_id: Option<TodoListId>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
            last_used_todolist_id: model.last_used_todolist_id.map(TodoListId::new),
        }
    }
}
