//! Repository implementations

mod article;
mod comment;
pub mod error;
mod like;
mod user;

pub use article::SqliteArticleRepository;
pub use comment::SqliteCommentRepository;
pub use like::SqliteLikeRepository;
pub use user::SqliteUserRepository;
