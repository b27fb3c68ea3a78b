//! Database row models

mod article;
mod comment;
mod like;
mod user;

pub use article::ArticleModel;
pub use comment::CommentModel;
pub use like::LikeModel;
pub use user::UserModel;
