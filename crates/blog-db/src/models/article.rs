//! Article database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the articles table
#[derive(Debug, Clone, FromRow)]
pub struct ArticleModel {
    pub id: i64,
    pub author: i64,
    pub title: String,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub image: Option<String>,
    pub likes_count: i64,
}
