pub mod todo;
pub mod todolist;
pub mod user;

pub use todo::{NewTodo, Todo};
pub use todolist::TodoList;
pub use user::User;
