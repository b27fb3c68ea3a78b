//! Article like database model

use sqlx::FromRow;

/// Database model for the article_likes table
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub user_id: i64,
    pub article_id: i64,
}
