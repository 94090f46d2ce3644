pub mod todo;
pub mod todolist;
pub mod user;

use sea_orm::{DbErr, SqlErr};

/// Result of an insert into a column guarded by a unique index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insert<T> {
    Created(T),
    /// The row collided with an existing value in a unique column.
    Duplicate,
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
