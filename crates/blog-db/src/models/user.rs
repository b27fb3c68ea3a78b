//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub surname: String,
    pub name: String,
    pub nickname: String,
    pub email: String,
    pub password_hash: String,
    pub modified_date: DateTime<Utc>,
    pub avatar: Option<String>,
    pub description: Option<String>,
    pub is_moderator: bool,
    pub is_admin: bool,
}
