//! User command handlers

use crate::config::Config;
use crate::domain::UserId;
use crate::services::TodoError;
use crate::state::SharedState;

pub async fn cmd_user_create(config: &Config) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let user = state.todo_service.create_user().await?;

    println!("✓ Created user #{}", user.id);
    println!("  Username: {}", user.username);
    println!();
    println!("Create a list with: todoboard list create {}", user.id);

    Ok(())
}

pub async fn cmd_user_show(config: &Config, id: i32) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let user = match state.todo_service.get_user(UserId::new(id)).await {
        Ok(user) => user,
        Err(TodoError::UserNotFound(_)) => {
            println!("User with ID {} not found.", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("User #{}", user.id);
    println!("  Username: {}", user.username);
    match user.last_used_todolist_id {
        Some(list_id) => println!("  Last used list: {}", list_id),
        None => println!("  Last used list: -"),
    }

    Ok(())
}
