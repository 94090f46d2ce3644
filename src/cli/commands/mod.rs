mod list;
mod user;

pub use list::{cmd_list_create, cmd_list_find, cmd_list_show};
pub use user::{cmd_user_create, cmd_user_show};
