//! Article entity - an authored post

use chrono::{DateTime, Utc};

use crate::value_objects::EntityId;

/// Maximum article title length
pub const MAX_TITLE_LEN: usize = 128;

/// Maximum article content length
pub const MAX_CONTENT_LEN: usize = 4096;

/// Article authored by a user. Owns comments and likes for itself; both are
/// cascade-deleted with the article.
///
/// `likes_count` is a denormalized counter kept equal to the number of live
/// like rows by the like repository's transactional insert/delete. It is never
/// recomputed from the like table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: EntityId,
    pub author: EntityId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub likes_count: i64,
    pub create_date: DateTime<Utc>,
}

/// Fields for creating an article; the store assigns the id and the
/// counter starts at zero.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author: EntityId,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}
