//! Error handling utilities for repositories

use blog_core::{DomainError, EntityId};
use sqlx::Error as SqlxError;

/// Convert a SQLx error to a DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for a unique violation and return the given conflict kind, falling
/// back to a database error for everything else
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: EntityId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create an "article not found" error
pub fn article_not_found(id: EntityId) -> DomainError {
    DomainError::ArticleNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: EntityId) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "like not found" error
pub fn like_not_found(user_id: EntityId, article_id: EntityId) -> DomainError {
    DomainError::LikeNotFound {
        user_id,
        article_id,
    }
}
