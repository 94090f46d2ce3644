pub mod prelude;

pub mod todolists;
pub mod todos;
pub mod users;
