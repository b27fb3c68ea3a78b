//! User entity - a registered account

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// User account. Owns articles, comments, and likes; all three are
/// cascade-deleted with the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub surname: String,
    pub nickname: String,
    pub email: String,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub is_moderator: bool,
    pub is_admin: bool,
    pub modified_date: DateTime<Utc>,
}

impl User {
    /// Moderator privilege. Admins hold it regardless of the `is_moderator`
    /// flag.
    #[inline]
    pub fn has_moderator_rights(&self) -> bool {
        self.is_admin || self.is_moderator
    }
}

/// Fields for creating a user; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub nickname: String,
    pub email: String,
    pub avatar: Option<String>,
    pub description: Option<String>,
}
