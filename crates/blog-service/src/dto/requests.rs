//! Request DTOs for the lifecycle workers
//!
//! All request DTOs implement `Deserialize` and `Validate`. Length caps on
//! article, comment, and profile text live here at the input boundary; the
//! ordered domain shape checks for nickname, email, and password live in
//! `blog_core::validation` and run inside the user worker.

use serde::Deserialize;
use validator::Validate;

use blog_core::EntityId;

// ============================================================================
// User Requests
// ============================================================================

/// User registration payload. The avatar image, if any, travels as raw bytes
/// next to this struct rather than inside it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterData {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Surname must be 1-64 characters"))]
    pub surname: String,

    pub nickname: String,

    pub email: String,

    pub password: String,

    pub password_again: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,
}

/// Profile edit payload. `password` is the current password and gates the
/// whole operation; every other field is optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserPatch {
    pub password: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Surname must be 1-64 characters"))]
    pub surname: Option<String>,

    pub nickname: Option<String>,

    pub email: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub new_password: Option<String>,

    pub new_password_again: Option<String>,
}

// ============================================================================
// Article Requests
// ============================================================================

/// New article payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewArticleData {
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: String,
}

/// Article edit payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArticlePatch {
    #[validate(length(min = 1, max = 128, message = "Title must be 1-128 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 4096, message = "Content must be 1-4096 characters"))]
    pub content: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// New comment payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCommentData {
    pub article_id: EntityId,

    #[validate(length(min = 1, max = 512, message = "Text must be 1-512 characters"))]
    pub text: String,
}

/// Comment edit payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentPatch {
    #[validate(length(min = 1, max = 512, message = "Text must be 1-512 characters"))]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_length_cap() {
        let data = NewArticleData {
            title: "t".repeat(129),
            content: "body".to_string(),
        };
        assert!(data.validate().is_err());

        let data = NewArticleData {
            title: "t".repeat(128),
            content: "body".to_string(),
        };
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_comment_text_cap() {
        let data = NewCommentData {
            article_id: EntityId::new(1),
            text: "x".repeat(513),
        };
        assert!(data.validate().is_err());
    }
}
