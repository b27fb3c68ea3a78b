//! SQLite implementation of CommentRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::QueryBuilder;
use tracing::instrument;

use blog_core::{Comment, CommentQuery, CommentRepository, DomainResult, EntityId, NewComment};

use crate::models::CommentModel;
use crate::pool::DbPool;

use super::error::{comment_not_found, map_db_error};

const COMMENT_COLUMNS: &str = "id, author, article_id, text, image, create_date";

/// SQLite implementation of CommentRepository
#[derive(Clone)]
pub struct SqliteCommentRepository {
    pool: DbPool,
}

impl SqliteCommentRepository {
    /// Create a new SqliteCommentRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for SqliteCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self), fields(author = %comment.author, article = %comment.article_id))]
    async fn create(&self, comment: &NewComment) -> DomainResult<EntityId> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO comments (author, article_id, text, image, create_date)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(comment.author.into_inner())
        .bind(comment.article_id.into_inner())
        .bind(&comment.text)
        .bind(&comment.image)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EntityId::new(id))
    }

    #[instrument(skip(self), fields(id = %comment.id))]
    async fn update(&self, comment: &Comment) -> DomainResult<()> {
        let result = sqlx::query("UPDATE comments SET text = ?, image = ? WHERE id = ?")
            .bind(&comment.text)
            .bind(&comment.image)
            .bind(comment.id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &CommentQuery) -> DomainResult<Vec<Comment>> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE 1 = 1"
        ));

        if let Some(author) = query.author {
            builder.push(" AND author = ").push_bind(author.into_inner());
        }
        if let Some(article) = query.article {
            builder
                .push(" AND article_id = ")
                .push_bind(article.into_inner());
        }

        builder
            .push(" ORDER BY create_date")
            .push(" LIMIT ")
            .push_bind(query.limit.unwrap_or(-1))
            .push(" OFFSET ")
            .push_bind(query.offset.unwrap_or(0));

        let results = builder
            .build_query_as::<CommentModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteCommentRepository>();
    }
}
