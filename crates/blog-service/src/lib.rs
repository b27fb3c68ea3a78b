//! # blog-service
//!
//! Application layer containing the entity lifecycle workers. Each worker
//! orders its checks deliberately (re-auth gates, uniqueness before shape,
//! duplicate-like before existence) and sequences image-file writes against
//! row updates so a crash never leaves a row pointing at a missing file.

pub mod dto;
pub mod services;

pub use dto::{
    project_article, project_comment, project_user, ArticleField, ArticlePatch, CommentField,
    CommentPatch, NewArticleData, NewCommentData, RegisterData, UserField, UserPatch,
};
pub use services::{
    ArticleService, CommentService, LikeService, ServiceContext, UserService,
};
