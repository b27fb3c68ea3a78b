//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub author: i64,
    pub article_id: i64,
    pub text: String,
    pub image: Option<String>,
    pub create_date: DateTime<Utc>,
}
