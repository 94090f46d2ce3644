//! Domain types for the board with strong typing.
//!
//! Users, lists and todos all use store-assigned `i32` ids. Each id space gets
//! its own newtype so a list id can never be passed where a user id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the underlying i32 value.
            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::models::User`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use todoboard::domain::UserId;
    ///
    /// let id = UserId::new(7);
    /// assert_eq!(id.value(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    UserId
);

entity_id!(
    /// Identifier of a [`crate::models::TodoList`].
    TodoListId
);

entity_id!(
    /// Identifier of a [`crate::models::Todo`].
    TodoId
);

/// Which referenced entity failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    TodoList,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::TodoList => "todolist",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&TodoListId::new(12)).unwrap();
        assert_eq!(json, "12");

        let id: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(id, UserId::new(5));
    }

    #[test]
    fn ids_convert_both_ways() {
        let id = TodoId::from(3);
        assert_eq!(i32::from(id), 3);
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn entity_kind_display() {
        assert_eq!(EntityKind::TodoList.to_string(), "todolist");
        assert_eq!(EntityKind::User.as_str(), "user");
    }
}
