//! Domain errors - flat taxonomy of named, non-overlapping error kinds
//!
//! Lifecycle workers never catch their own errors; every failure propagates as
//! one of these kinds and the presentation layer maps each to a user-facing
//! outcome. There is no transient-failure class and no retry anywhere.

use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    #[error("Article not found: {0}")]
    ArticleNotFound(EntityId),

    #[error("Comment not found: {0}")]
    CommentNotFound(EntityId),

    #[error("Like not found for user {user_id} on article {article_id}")]
    LikeNotFound {
        user_id: EntityId,
        article_id: EntityId,
    },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Action forbidden to this user")]
    Forbidden,

    /// Re-authentication gate failed: the supplied current password does not
    /// match the stored hash.
    #[error("Incorrect password")]
    IncorrectPassword,

    // =========================================================================
    // Validation Errors (shape checks, independent of stored data)
    // =========================================================================
    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Password must be 8-512 characters long")]
    IncorrectPasswordLength,

    #[error("Password must contain at least one non-whitespace character")]
    InsecurePassword,

    #[error("Nickname must be 3-32 characters long")]
    IncorrectNicknameLength,

    #[error("Nickname may only contain ASCII letters, digits, and underscores")]
    NicknameInvalidCharacters,

    #[error("Incorrect email format")]
    IncorrectEmailFormat,

    #[error("Incorrect image payload")]
    IncorrectImage,

    // =========================================================================
    // Conflict Errors (uniqueness against stored data)
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("Nickname already taken")]
    UserAlreadyExists,

    #[error("Article already liked by this user")]
    AlreadyLiked,

    // =========================================================================
    // Query Errors
    // =========================================================================
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get a stable error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::ArticleNotFound(_) => "ARTICLE_NOT_FOUND",
            Self::CommentNotFound(_) => "COMMENT_NOT_FOUND",
            Self::LikeNotFound { .. } => "LIKE_NOT_FOUND",

            Self::Forbidden => "FORBIDDEN",
            Self::IncorrectPassword => "INCORRECT_PASSWORD",

            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::IncorrectPasswordLength => "INCORRECT_PASSWORD_LENGTH",
            Self::InsecurePassword => "INSECURE_PASSWORD",
            Self::IncorrectNicknameLength => "INCORRECT_NICKNAME_LENGTH",
            Self::NicknameInvalidCharacters => "NICKNAME_INVALID_CHARACTERS",
            Self::IncorrectEmailFormat => "INCORRECT_EMAIL_FORMAT",
            Self::IncorrectImage => "INCORRECT_IMAGE",

            Self::EmailAlreadyInUse => "EMAIL_ALREADY_IN_USE",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::AlreadyLiked => "ALREADY_LIKED",

            Self::UnknownFilter(_) => "UNKNOWN_FILTER",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::IoError(_) => "IO_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ArticleNotFound(_)
                | Self::CommentNotFound(_)
                | Self::LikeNotFound { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden | Self::IncorrectPassword)
    }

    /// Check if this is a shape-validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::PasswordMismatch
                | Self::IncorrectPasswordLength
                | Self::InsecurePassword
                | Self::IncorrectNicknameLength
                | Self::NicknameInvalidCharacters
                | Self::IncorrectEmailFormat
                | Self::IncorrectImage
                | Self::UnknownFilter(_)
        )
    }

    /// Check if this is a uniqueness-conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyInUse | Self::UserAlreadyExists | Self::AlreadyLiked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(EntityId::new(1));
        assert_eq!(err.code(), "USER_NOT_FOUND");

        let err = DomainError::UnknownFilter("sideways".to_string());
        assert_eq!(err.code(), "UNKNOWN_FILTER");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::ArticleNotFound(EntityId::new(1)).is_not_found());
        assert!(DomainError::LikeNotFound {
            user_id: EntityId::new(1),
            article_id: EntityId::new(2),
        }
        .is_not_found());
        assert!(!DomainError::AlreadyLiked.is_not_found());
    }

    #[test]
    fn test_is_forbidden() {
        assert!(DomainError::Forbidden.is_forbidden());
        assert!(DomainError::IncorrectPassword.is_forbidden());
        assert!(!DomainError::PasswordMismatch.is_forbidden());
    }

    #[test]
    fn test_categories_do_not_overlap() {
        let errors = [
            DomainError::UserNotFound(EntityId::new(1)),
            DomainError::Forbidden,
            DomainError::PasswordMismatch,
            DomainError::EmailAlreadyInUse,
            DomainError::DatabaseError("boom".to_string()),
        ];
        for err in &errors {
            let categories = [
                err.is_not_found(),
                err.is_forbidden(),
                err.is_validation(),
                err.is_conflict(),
            ];
            assert!(categories.iter().filter(|&&c| c).count() <= 1, "{err}");
        }
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ArticleNotFound(EntityId::new(123));
        assert_eq!(err.to_string(), "Article not found: 123");
    }
}
