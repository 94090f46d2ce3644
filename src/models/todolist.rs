use crate::domain::{TodoListId, UserId};
use crate::entities::todolists;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: TodoListId,
    /// The user who created the list. Not an access restriction.
    pub user_id: UserId,
    pub slug: String,
}

impl From<todolists::Model> for TodoList {
    fn from(model: todolists::Model) -> Self {
        Self {
            id: TodoListId::new(model.id),
            user_id: UserId::new(model.user_id),
            slug: model.slug,
        }
    }
}
