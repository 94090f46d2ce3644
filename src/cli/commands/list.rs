//! Todo list command handlers

use crate::config::Config;
use crate::domain::{TodoListId, UserId};
use crate::services::{ErrorKind, TodoError};
use crate::state::SharedState;

pub async fn cmd_list_create(config: &Config, user_id: i32) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let list = match state
        .todo_service
        .create_todo_list(UserId::new(user_id))
        .await
    {
        Ok(list) => list,
        Err(e) if e.kind() == ErrorKind::InvalidReference => {
            println!("User with ID {} does not exist.", user_id);
            println!("Create one first with: todoboard user create");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("✓ Created list #{}", list.id);
    println!("  Share code: {}", list.slug);

    Ok(())
}

pub async fn cmd_list_show(config: &Config, id: i32) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let todos = state
        .todo_service
        .get_todo_list(TodoListId::new(id))
        .await?;

    if todos.is_empty() {
        println!("List {} has no todos.", id);
        return Ok(());
    }

    println!("List {} ({} todos)", id, todos.len());
    println!("{:-<70}", "");

    for todo in todos {
        println!("[{}] {} ({})", todo.column, todo.title, todo.creator);
        println!("  ID: {} | Updated: {}", todo.id, todo.last_updated);
    }

    Ok(())
}

pub async fn cmd_list_find(config: &Config, slug: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    match state.todo_service.find_todo_list_by_slug(slug).await {
        Ok(list) => {
            println!("List #{} (share code {})", list.id, list.slug);
            println!("  Created by user {}", list.user_id);
            Ok(())
        }
        Err(TodoError::TodoListNotFound(_)) => {
            println!("No list with share code '{}'.", slug);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
