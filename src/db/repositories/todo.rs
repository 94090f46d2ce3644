use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr,
};
use std::collections::HashMap;

use crate::domain::{TodoId, TodoListId, UserId};
use crate::entities::{prelude::*, todos, users};
use crate::models::Todo;

/// Row contents for an insert; `creator` is already resolved.
#[derive(Debug, Clone)]
pub struct TodoRow<'a> {
    pub title: &'a str,
    pub user_id: UserId,
    pub todolist_id: TodoListId,
    pub creator: &'a str,
    pub column: &'a str,
    pub last_updated: &'a str,
}

pub struct TodoRepository {
    conn: DatabaseConnection,
}

impl TodoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, row: TodoRow<'_>) -> Result<Todo> {
        let active = todos::ActiveModel {
            title: Set(row.title.to_string()),
            user_id: Set(row.user_id.value()),
            todolist_id: Set(row.todolist_id.value()),
            creator: Set(row.creator.to_string()),
            column: Set(row.column.to_string()),
            last_updated: Set(row.last_updated.to_string()),
            ..Default::default()
        };

        let res = Todos::insert(active)
            .exec(&self.conn)
            .await
            .context("Failed to insert todo")?;

        Ok(Todo {
            id: TodoId::new(res.last_insert_id),
            title: row.title.to_string(),
            user_id: row.user_id,
            todolist_id: row.todolist_id,
            creator: row.creator.to_string(),
            column: row.column.to_string(),
            last_updated: row.last_updated.to_string(),
        })
    }

    /// All todos of a list in insertion order, with `creator` replaced by the
    /// author's current username. Rows whose author no longer exists keep the
    /// stored snapshot.
    pub async fn list_for_todolist(&self, todolist_id: TodoListId) -> Result<Vec<Todo>> {
        let rows = Todos::find()
            .filter(todos::Column::TodolistId.eq(todolist_id.value()))
            .order_by_asc(todos::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query todos for todolist")?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<i32> = rows.iter().map(|r| r.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<i32, String> = Users::find()
            .filter(users::Column::Id.is_in(author_ids))
            .all(&self.conn)
            .await
            .context("Failed to query todo authors")?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let live = authors.get(&row.user_id).cloned();
                let mut todo = Todo::from(row);
                if let Some(username) = live {
                    todo.creator = username;
                }
                todo
            })
            .collect())
    }

    /// Returns the number of rows touched; zero when the id does not exist.
    pub async fn update_column(&self, id: TodoId, column: &str, last_updated: &str) -> Result<u64> {
        let result = Todos::update_many()
            .col_expr(todos::Column::Column, Expr::value(column))
            .col_expr(todos::Column::LastUpdated, Expr::value(last_updated))
            .filter(todos::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to update todo column")?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: TodoId) -> Result<u64> {
        let result = Todos::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete todo")?;

        Ok(result.rows_affected)
    }
}
