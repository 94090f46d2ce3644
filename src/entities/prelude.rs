pub use super::todolists::Entity as Todolists;
pub use super::todos::Entity as Todos;
pub use super::users::Entity as Users;
