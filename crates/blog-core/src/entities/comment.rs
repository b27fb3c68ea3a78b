//! Comment entity - a reply attached to an article

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Maximum comment text length
pub const MAX_TEXT_LEN: usize = 512;

/// Comment on an article. Deleted when its parent article or its author is
/// deleted. Carries no cascade children of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: EntityId,
    pub author: EntityId,
    pub article_id: EntityId,
    pub text: String,
    pub image: Option<String>,
    pub create_date: DateTime<Utc>,
}

/// Fields for creating a comment; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub author: EntityId,
    pub article_id: EntityId,
    pub text: String,
    pub image: Option<String>,
}
