//! CLI module - Command-line interface for todoboard
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// todoboard - shared kanban to-do list backend
#[derive(Parser)]
#[command(name = "todoboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    #[command(alias = "daemon", alias = "-d")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Create or inspect users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Create or inspect todo lists
    List {
        #[command(subcommand)]
        command: ListCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user with a generated username
    Create,
    /// Show a user
    Show {
        /// User ID
        id: i32,
    },
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Create a todo list for a user
    Create {
        /// Owning user ID
        user_id: i32,
    },
    /// Show the todos of a list
    #[command(alias = "ls")]
    Show {
        /// Todo list ID
        id: i32,
    },
    /// Look up a list by its sharing slug
    Find {
        /// Sharing slug, e.g. abc-defg-hij
        slug: String,
    },
}

pub use commands::*;
