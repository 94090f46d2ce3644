pub mod identifiers;
pub use identifiers::{IdentifierError, IdentifierGenerator, IdentifierKind, IdentifierPolicy};

pub mod todo_service;
pub use todo_service::{ErrorKind, TodoError, TodoService};

pub mod todo_service_impl;
pub use todo_service_impl::SeaOrmTodoService;
