use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use tracing::debug;

use super::{Insert, is_unique_violation};
use crate::domain::{TodoListId, UserId};
use crate::entities::{prelude::*, todolists};
use crate::models::TodoList;

pub struct TodoListRepository {
    conn: DatabaseConnection,
}

impl TodoListRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, user_id: UserId, slug: &str) -> Result<Insert<TodoList>> {
        let active = todolists::ActiveModel {
            user_id: Set(user_id.value()),
            slug: Set(slug.to_string()),
            ..Default::default()
        };

        match Todolists::insert(active).exec(&self.conn).await {
            Ok(res) => {
                debug!(todolist_id = res.last_insert_id, slug, "Inserted todolist");
                Ok(Insert::Created(TodoList {
                    id: TodoListId::new(res.last_insert_id),
                    user_id,
                    slug: slug.to_string(),
                }))
            }
            Err(e) if is_unique_violation(&e) => Ok(Insert::Duplicate),
            Err(e) => Err(e).context("Failed to insert todolist"),
        }
    }

    pub async fn exists(&self, id: TodoListId) -> Result<bool> {
        let count = Todolists::find_by_id(id.value())
            .count(&self.conn)
            .await
            .context("Failed to check todolist existence")?;

        Ok(count > 0)
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let count = Todolists::find()
            .filter(todolists::Column::Slug.eq(slug))
            .count(&self.conn)
            .await
            .context("Failed to check slug existence")?;

        Ok(count > 0)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<TodoList>> {
        let list = Todolists::find()
            .filter(todolists::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query todolist by slug")?;

        Ok(list.map(TodoList::from))
    }
}
