//! # blog-core
//!
//! Domain layer containing entities, the permission engine, shape validation,
//! and repository traits. This crate has zero dependencies on infrastructure
//! (database, file system, web framework, etc.).

pub mod entities;
pub mod error;
pub mod permissions;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Article, ArticleLike, Comment, NewArticle, NewComment, NewUser, User};
pub use error::DomainError;
pub use permissions::{can_assign_moderator, can_delete};
pub use traits::{
    ArticleQuery, ArticleRepository, ArticleSort, CommentQuery, CommentRepository, DomainResult,
    LikeRepository, NicknameFilter, UserQuery, UserRepository, UserSort,
};
pub use value_objects::EntityId;
