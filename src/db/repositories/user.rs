use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
    sea_query::Expr,
};
use tracing::debug;

use super::{Insert, is_unique_violation};
use crate::domain::{TodoListId, UserId};
use crate::entities::{prelude::*, users};
use crate::models::User;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a user with the given username.
    ///
    /// A unique-index rejection on `username` is reported as
    /// [`Insert::Duplicate`] rather than an error.
    pub async fn insert(&self, username: &str) -> Result<Insert<User>> {
        let active = users::ActiveModel {
            username: Set(username.to_string()),
            last_used_todolist_id: Set(None),
            ..Default::default()
        };

        match Users::insert(active).exec(&self.conn).await {
            Ok(res) => {
                debug!(user_id = res.last_insert_id, username, "Inserted user");
                Ok(Insert::Created(User {
                    id: UserId::new(res.last_insert_id),
                    username: username.to_string(),
                    last_used_todolist_id: None,
                }))
            }
            Err(e) if is_unique_violation(&e) => Ok(Insert::Duplicate),
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = Users::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn exists(&self, id: UserId) -> Result<bool> {
        let count = Users::find_by_id(id.value())
            .count(&self.conn)
            .await
            .context("Failed to check user existence")?;

        Ok(count > 0)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.conn)
            .await
            .context("Failed to check username existence")?;

        Ok(count > 0)
    }

    /// Resolve a user id to its username. `None` doubles as "no such user".
    pub async fn get_username(&self, id: UserId) -> Result<Option<String>> {
        let username = Users::find_by_id(id.value())
            .select_only()
            .column(users::Column::Username)
            .into_tuple::<String>()
            .one(&self.conn)
            .await
            .context("Failed to query username")?;

        Ok(username)
    }

    pub async fn set_last_used_todolist(&self, id: UserId, todolist_id: TodoListId) -> Result<()> {
        Users::update_many()
            .col_expr(
                users::Column::LastUsedTodolistId,
                Expr::value(todolist_id.value()),
            )
            .filter(users::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to update last used todolist")?;

        Ok(())
    }
}
