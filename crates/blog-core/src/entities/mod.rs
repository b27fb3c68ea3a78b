//! Domain entities

mod article;
mod comment;
mod like;
mod user;

pub use article::{Article, NewArticle, MAX_CONTENT_LEN, MAX_TITLE_LEN};
pub use comment::{Comment, NewComment, MAX_TEXT_LEN};
pub use like::ArticleLike;
pub use user::{NewUser, User};
