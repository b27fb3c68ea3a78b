//! Field projections - allowlisted views over entities
//!
//! Callers name the fields they want; unknown names fail fast with
//! `UnknownFilter` at parse time and an empty selection falls back to a
//! minimal default per entity. Password hashes never appear in any
//! projection: the user allowlist simply has no such field.

use std::str::FromStr;

use serde_json::{Map, Value};

use blog_core::{Article, Comment, DomainError, User};

fn opt_str(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::String)
}

// ============================================================================
// Article
// ============================================================================

/// Projectable article fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Id,
    Author,
    Title,
    Content,
    CreateDate,
    Image,
    LikesCount,
}

impl ArticleField {
    /// Minimal default projection used when no fields are requested
    pub const MINIMAL: &'static [Self] = &[Self::Id, Self::Title];
}

impl FromStr for ArticleField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "author" => Ok(Self::Author),
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "create_date" => Ok(Self::CreateDate),
            "image" => Ok(Self::Image),
            "likes_count" => Ok(Self::LikesCount),
            other => Err(DomainError::UnknownFilter(format!(
                "unknown article field: {other}"
            ))),
        }
    }
}

/// Project an article onto the requested fields. An empty selection yields
/// the minimal default `(id, title)`.
pub fn project_article(article: &Article, fields: &[ArticleField]) -> Map<String, Value> {
    let fields = if fields.is_empty() {
        ArticleField::MINIMAL
    } else {
        fields
    };

    let mut map = Map::new();
    for field in fields {
        match field {
            ArticleField::Id => {
                map.insert("id".to_string(), Value::from(article.id.into_inner()));
            }
            ArticleField::Author => {
                map.insert("author".to_string(), Value::from(article.author.into_inner()));
            }
            ArticleField::Title => {
                map.insert("title".to_string(), Value::String(article.title.clone()));
            }
            ArticleField::Content => {
                map.insert("content".to_string(), Value::String(article.content.clone()));
            }
            ArticleField::CreateDate => {
                map.insert(
                    "create_date".to_string(),
                    Value::String(article.create_date.to_rfc3339()),
                );
            }
            ArticleField::Image => {
                map.insert("image".to_string(), opt_str(&article.image));
            }
            ArticleField::LikesCount => {
                map.insert("likes_count".to_string(), Value::from(article.likes_count));
            }
        }
    }
    map
}

// ============================================================================
// Comment
// ============================================================================

/// Projectable comment fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentField {
    Id,
    Author,
    ArticleId,
    Text,
    Image,
    CreateDate,
}

impl CommentField {
    /// Minimal default projection used when no fields are requested
    pub const MINIMAL: &'static [Self] = &[Self::Id, Self::Author, Self::ArticleId];
}

impl FromStr for CommentField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "author" => Ok(Self::Author),
            "article_id" => Ok(Self::ArticleId),
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "create_date" => Ok(Self::CreateDate),
            other => Err(DomainError::UnknownFilter(format!(
                "unknown comment field: {other}"
            ))),
        }
    }
}

/// Project a comment onto the requested fields. An empty selection yields
/// the minimal default `(id, author, article_id)`.
pub fn project_comment(comment: &Comment, fields: &[CommentField]) -> Map<String, Value> {
    let fields = if fields.is_empty() {
        CommentField::MINIMAL
    } else {
        fields
    };

    let mut map = Map::new();
    for field in fields {
        match field {
            CommentField::Id => {
                map.insert("id".to_string(), Value::from(comment.id.into_inner()));
            }
            CommentField::Author => {
                map.insert("author".to_string(), Value::from(comment.author.into_inner()));
            }
            CommentField::ArticleId => {
                map.insert(
                    "article_id".to_string(),
                    Value::from(comment.article_id.into_inner()),
                );
            }
            CommentField::Text => {
                map.insert("text".to_string(), Value::String(comment.text.clone()));
            }
            CommentField::Image => {
                map.insert("image".to_string(), opt_str(&comment.image));
            }
            CommentField::CreateDate => {
                map.insert(
                    "create_date".to_string(),
                    Value::String(comment.create_date.to_rfc3339()),
                );
            }
        }
    }
    map
}

// ============================================================================
// User
// ============================================================================

/// Projectable user fields. The password hash is not on this list and can
/// never be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Surname,
    Nickname,
    Email,
    Description,
    Avatar,
    ModifiedDate,
    IsModerator,
    IsAdmin,
}

impl UserField {
    /// Minimal default projection used when no fields are requested
    pub const MINIMAL: &'static [Self] = &[Self::Id, Self::Nickname];
}

impl FromStr for UserField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "surname" => Ok(Self::Surname),
            "nickname" => Ok(Self::Nickname),
            "email" => Ok(Self::Email),
            "description" => Ok(Self::Description),
            "avatar" => Ok(Self::Avatar),
            "modified_date" => Ok(Self::ModifiedDate),
            "is_moderator" => Ok(Self::IsModerator),
            "is_admin" => Ok(Self::IsAdmin),
            other => Err(DomainError::UnknownFilter(format!(
                "unknown user field: {other}"
            ))),
        }
    }
}

/// Project a user onto the requested fields. An empty selection yields the
/// minimal default `(id, nickname)`.
pub fn project_user(user: &User, fields: &[UserField]) -> Map<String, Value> {
    let fields = if fields.is_empty() {
        UserField::MINIMAL
    } else {
        fields
    };

    let mut map = Map::new();
    for field in fields {
        match field {
            UserField::Id => {
                map.insert("id".to_string(), Value::from(user.id.into_inner()));
            }
            UserField::Name => {
                map.insert("name".to_string(), Value::String(user.name.clone()));
            }
            UserField::Surname => {
                map.insert("surname".to_string(), Value::String(user.surname.clone()));
            }
            UserField::Nickname => {
                map.insert("nickname".to_string(), Value::String(user.nickname.clone()));
            }
            UserField::Email => {
                map.insert("email".to_string(), Value::String(user.email.clone()));
            }
            UserField::Description => {
                map.insert("description".to_string(), opt_str(&user.description));
            }
            UserField::Avatar => {
                map.insert("avatar".to_string(), opt_str(&user.avatar));
            }
            UserField::ModifiedDate => {
                map.insert(
                    "modified_date".to_string(),
                    Value::String(user.modified_date.to_rfc3339()),
                );
            }
            UserField::IsModerator => {
                map.insert("is_moderator".to_string(), Value::Bool(user.is_moderator));
            }
            UserField::IsAdmin => {
                map.insert("is_admin".to_string(), Value::Bool(user.is_admin));
            }
        }
    }
    map
}
