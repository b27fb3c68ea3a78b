//! Lifecycle workers and their dependency container

pub mod article;
pub mod comment;
pub mod context;
pub mod like;
pub mod user;

pub use article::ArticleService;
pub use comment::CommentService;
pub use context::ServiceContext;
pub use like::LikeService;
pub use user::UserService;
