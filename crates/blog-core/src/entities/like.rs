//! Article like - join entity between one user and one article

use crate::value_objects::EntityId;

/// Like set by a user on an article. At most one per (user, article) pair,
/// enforced by a store-level unique constraint. Its existence increments the
/// article's `likes_count`; its removal decrements it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleLike {
    pub user_id: EntityId,
    pub article_id: EntityId,
}
