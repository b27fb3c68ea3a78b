//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer provides
//! the implementation. The store declares cascade-on-delete edges for
//! user->article, user->comment, user->like, article->comment, and
//! article->like.

use std::str::FromStr;

use async_trait::async_trait;

use crate::entities::{Article, ArticleLike, Comment, NewArticle, NewComment, NewUser, User};
use crate::error::DomainError;
use crate::value_objects::EntityId;

/// Result type for repository and service operations
pub type DomainResult<T> = Result<T, DomainError>;

// ============================================================================
// Query types
// ============================================================================

/// Sort order for article listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSort {
    /// Newest first
    #[default]
    CreateDate,
    /// Most liked first, newest first within equal counts
    LikesCount,
}

impl FromStr for ArticleSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_date" => Ok(Self::CreateDate),
            "likes_count" => Ok(Self::LikesCount),
            other => Err(DomainError::UnknownFilter(format!(
                "unknown article sort key: {other}"
            ))),
        }
    }
}

/// Filter and pagination options for article listings
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    pub author: Option<EntityId>,
    pub sort: ArticleSort,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Filter and pagination options for comment listings
#[derive(Debug, Clone, Default)]
pub struct CommentQuery {
    pub author: Option<EntityId>,
    pub article: Option<EntityId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Nickname matching mode for user search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NicknameFilter {
    /// Case-sensitive exact match
    #[default]
    Equals,
    /// Case-insensitive exact match
    EqualsCaseInsensitive,
    /// Nickname starts with the search string
    Starts,
    /// Nickname ends with the search string
    Ends,
    /// Nickname contains the search string
    Contains,
}

impl FromStr for NicknameFilter {
    type Err = DomainError;

    /// An unrecognized mode fails fast rather than degrading to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equals" => Ok(Self::Equals),
            "equals_case_insensitive" => Ok(Self::EqualsCaseInsensitive),
            "starts" => Ok(Self::Starts),
            "ends" => Ok(Self::Ends),
            "contains" => Ok(Self::Contains),
            other => Err(DomainError::UnknownFilter(format!(
                "unknown nickname filter: {other}"
            ))),
        }
    }
}

/// Allowlisted sort key for user listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSort {
    #[default]
    Id,
    Nickname,
}

impl FromStr for UserSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "nickname" => Ok(Self::Nickname),
            other => Err(DomainError::UnknownFilter(format!(
                "unknown user sort key: {other}"
            ))),
        }
    }
}

/// Search, sort, and pagination options for user listings
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub nickname_search: Option<String>,
    pub nickname_filter: NicknameFilter,
    pub sort: UserSort,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Check if an email is taken, optionally excluding one user's own row
    async fn email_taken(&self, email: &str, exclude: Option<EntityId>) -> DomainResult<bool>;

    /// Check if a nickname is taken, optionally excluding one user's own row
    async fn nickname_taken(&self, nickname: &str, exclude: Option<EntityId>)
        -> DomainResult<bool>;

    /// Create a new user; returns the store-assigned id
    async fn create(&self, user: &NewUser, password_hash: &str) -> DomainResult<EntityId>;

    /// Update an existing user's profile fields
    async fn update(&self, user: &User) -> DomainResult<()>;

    /// Get password hash for re-authentication
    async fn get_password_hash(&self, id: EntityId) -> DomainResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: EntityId, password_hash: &str) -> DomainResult<()>;

    /// Set or clear the moderator flag
    async fn set_moderator(&self, id: EntityId, is_moderator: bool) -> DomainResult<()>;

    /// Set or clear the admin flag
    async fn set_admin(&self, id: EntityId, is_admin: bool) -> DomainResult<()>;

    /// Delete the user row; the store cascades articles, comments, and likes
    async fn delete(&self, id: EntityId) -> DomainResult<()>;

    /// List users matching the query
    async fn search(&self, query: &UserQuery) -> DomainResult<Vec<User>>;
}

// ============================================================================
// Article Repository
// ============================================================================

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Find article by ID
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Article>>;

    /// Create a new article with a zero like counter; returns the assigned id
    async fn create(&self, article: &NewArticle) -> DomainResult<EntityId>;

    /// Update title, content, and image reference
    async fn update(&self, article: &Article) -> DomainResult<()>;

    /// Delete the article row; the store cascades comments and likes
    async fn delete(&self, id: EntityId) -> DomainResult<()>;

    /// Atomically add `delta` to the like counter; fails with
    /// `ArticleNotFound` if the article vanished concurrently
    async fn update_likes_count(&self, id: EntityId, delta: i64) -> DomainResult<()>;

    /// List articles matching the query
    async fn list(&self, query: &ArticleQuery) -> DomainResult<Vec<Article>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Comment>>;

    /// Create a new comment; returns the assigned id
    async fn create(&self, comment: &NewComment) -> DomainResult<EntityId>;

    /// Update text and image reference
    async fn update(&self, comment: &Comment) -> DomainResult<()>;

    /// Delete the comment row
    async fn delete(&self, id: EntityId) -> DomainResult<()>;

    /// List comments matching the query
    async fn list(&self, query: &CommentQuery) -> DomainResult<Vec<Comment>>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Find the like for a (user, article) pair
    async fn find(&self, user_id: EntityId, article_id: EntityId)
        -> DomainResult<Option<ArticleLike>>;

    /// Insert the like row and increment the article's counter inside one
    /// store transaction. A unique-constraint conflict maps to `AlreadyLiked`.
    async fn create(&self, like: &ArticleLike) -> DomainResult<()>;

    /// Delete the like row and decrement the article's counter inside one
    /// store transaction. A missing row maps to `LikeNotFound`.
    async fn delete(&self, user_id: EntityId, article_id: EntityId) -> DomainResult<()>;

    /// List all likes set by a user
    async fn find_by_user(&self, user_id: EntityId) -> DomainResult<Vec<ArticleLike>>;

    /// Count live like rows for an article
    async fn count_for_article(&self, article_id: EntityId) -> DomainResult<i64>;
}
