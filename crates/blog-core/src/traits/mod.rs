//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ArticleQuery, ArticleRepository, ArticleSort, CommentQuery, CommentRepository, DomainResult,
    LikeRepository, NicknameFilter, UserQuery, UserRepository, UserSort,
};
