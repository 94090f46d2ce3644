//! `SeaORM` implementation of the `TodoService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::db::{Insert, Store, TodoRow};
use crate::domain::{TodoId, TodoListId, UserId};
use crate::models::{NewTodo, Todo, TodoList, User};
use crate::services::identifiers::{
    IdentifierGenerator, IdentifierKind, IdentifierPolicy, record_collision,
};
use crate::services::todo_service::{TodoError, TodoService};

pub struct SeaOrmTodoService {
    store: Store,
    identifiers: IdentifierGenerator,
}

impl SeaOrmTodoService {
    #[must_use]
    pub fn new(store: Store, policy: IdentifierPolicy) -> Self {
        let identifiers = IdentifierGenerator::new(Arc::new(store.clone()), policy);
        Self::with_generator(store, identifiers)
    }

    #[must_use]
    pub const fn with_generator(store: Store, identifiers: IdentifierGenerator) -> Self {
        Self { store, identifiers }
    }

    /// Generate a slug and insert the list, regenerating when the unique
    /// index rejects the slug. Like lookup collisions, these retry without
    /// limit.
    async fn insert_todo_list(&self, user_id: UserId) -> Result<TodoList, TodoError> {
        loop {
            let slug = self.identifiers.generate_todolist_slug().await?;
            match self.store.insert_todolist(user_id, &slug).await? {
                Insert::Created(list) => return Ok(list),
                Insert::Duplicate => {
                    warn!(slug = %slug, "Slug taken at insert, regenerating");
                    record_collision(IdentifierKind::Slug);
                }
            }
        }
    }
}

#[async_trait]
impl TodoService for SeaOrmTodoService {
    async fn create_user(&self) -> Result<User, TodoError> {
        loop {
            let username = self.identifiers.generate_username().await?;
            match self.store.insert_user(&username).await? {
                Insert::Created(user) => {
                    info!(user_id = %user.id, username = %user.username, "Created user");
                    return Ok(user);
                }
                Insert::Duplicate => {
                    warn!(username = %username, "Username taken at insert, regenerating");
                    record_collision(IdentifierKind::Username);
                }
            }
        }
    }

    async fn get_user(&self, id: UserId) -> Result<User, TodoError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(TodoError::UserNotFound(id))
    }

    async fn create_todo_list(&self, user_id: UserId) -> Result<TodoList, TodoError> {
        if !self.store.user_exists(user_id).await? {
            return Err(TodoError::invalid_user(user_id));
        }

        let list = self.insert_todo_list(user_id).await?;

        // Not atomic with the insert: a failure here leaves the list in place
        // and the advisory pointer stale.
        self.store.set_last_used_todolist(user_id, list.id).await?;

        info!(
            todolist_id = %list.id,
            user_id = %user_id,
            slug = %list.slug,
            "Created todo list"
        );
        Ok(list)
    }

    async fn get_todo_list(&self, id: TodoListId) -> Result<Vec<Todo>, TodoError> {
        let todos = self.store.list_todos(id).await?;
        debug!(todolist_id = %id, count = todos.len(), "Loaded todo list");
        Ok(todos)
    }

    async fn find_todo_list_by_slug(&self, slug: &str) -> Result<TodoList, TodoError> {
        self.store
            .get_todolist_by_slug(slug)
            .await?
            .ok_or_else(|| TodoError::TodoListNotFound(slug.to_string()))
    }

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, TodoError> {
        if !self.store.todolist_exists(todo.todolist_id).await? {
            return Err(TodoError::invalid_todolist(todo.todolist_id));
        }

        let creator = self
            .store
            .get_username(todo.user_id)
            .await?
            .ok_or_else(|| TodoError::invalid_user(todo.user_id))?;

        let last_updated = todo
            .last_updated
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        let created = self
            .store
            .insert_todo(TodoRow {
                title: &todo.title,
                user_id: todo.user_id,
                todolist_id: todo.todolist_id,
                creator: &creator,
                column: &todo.column,
                last_updated: &last_updated,
            })
            .await?;

        info!(
            todo_id = %created.id,
            todolist_id = %created.todolist_id,
            column = %created.column,
            "Created todo"
        );
        Ok(created)
    }

    async fn update_todo_column(
        &self,
        id: TodoId,
        column: &str,
        last_updated: &str,
    ) -> Result<(), TodoError> {
        let rows = self
            .store
            .update_todo_column(id, column, last_updated)
            .await?;

        if rows == 0 {
            debug!(todo_id = %id, "Column update matched no todo");
        }
        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), TodoError> {
        let rows = self.store.delete_todo(id).await?;

        if rows == 0 {
            debug!(todo_id = %id, "Delete matched no todo");
        } else {
            info!(todo_id = %id, "Deleted todo");
        }
        Ok(())
    }
}
