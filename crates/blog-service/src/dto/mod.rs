//! Data transfer objects - request payloads and field projections

mod projection;
mod requests;

pub use projection::{
    project_article, project_comment, project_user, ArticleField, CommentField, UserField,
};
pub use requests::{
    ArticlePatch, CommentPatch, NewArticleData, NewCommentData, RegisterData, UserPatch,
};
