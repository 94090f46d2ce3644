use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{TodoId, TodoListId, UserId};
use crate::models::{Todo, TodoList, User};

pub mod migrator;
pub mod repositories;

pub use repositories::Insert;
pub use repositories::todo::TodoRow;

/// Shared handle to the `SQLite` pool. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn todolist_repo(&self) -> repositories::todolist::TodoListRepository {
        repositories::todolist::TodoListRepository::new(self.conn.clone())
    }

    fn todo_repo(&self) -> repositories::todo::TodoRepository {
        repositories::todo::TodoRepository::new(self.conn.clone())
    }

    // Users

    pub async fn insert_user(&self, username: &str) -> Result<Insert<User>> {
        self.user_repo().insert(username).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn user_exists(&self, id: UserId) -> Result<bool> {
        self.user_repo().exists(id).await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.user_repo().username_exists(username).await
    }

    pub async fn get_username(&self, id: UserId) -> Result<Option<String>> {
        self.user_repo().get_username(id).await
    }

    pub async fn set_last_used_todolist(&self, id: UserId, todolist_id: TodoListId) -> Result<()> {
        self.user_repo()
            .set_last_used_todolist(id, todolist_id)
            .await
    }

    // Todo lists

    pub async fn insert_todolist(&self, user_id: UserId, slug: &str) -> Result<Insert<TodoList>> {
        self.todolist_repo().insert(user_id, slug).await
    }

    pub async fn todolist_exists(&self, id: TodoListId) -> Result<bool> {
        self.todolist_repo().exists(id).await
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        self.todolist_repo().slug_exists(slug).await
    }

    pub async fn get_todolist_by_slug(&self, slug: &str) -> Result<Option<TodoList>> {
        self.todolist_repo().get_by_slug(slug).await
    }

    // Todos

    pub async fn insert_todo(&self, row: TodoRow<'_>) -> Result<Todo> {
        self.todo_repo().insert(row).await
    }

    pub async fn list_todos(&self, todolist_id: TodoListId) -> Result<Vec<Todo>> {
        self.todo_repo().list_for_todolist(todolist_id).await
    }

    pub async fn update_todo_column(
        &self,
        id: TodoId,
        column: &str,
        last_updated: &str,
    ) -> Result<u64> {
        self.todo_repo()
            .update_column(id, column, last_updated)
            .await
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<u64> {
        self.todo_repo().delete(id).await
    }
}
