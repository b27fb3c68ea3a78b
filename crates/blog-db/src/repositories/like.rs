//! SQLite implementation of LikeRepository
//!
//! The like row and the article's denormalized counter always change inside
//! one transaction so the counter never drifts from the live rows.

use async_trait::async_trait;
use tracing::instrument;

use blog_core::{ArticleLike, DomainError, DomainResult, EntityId, LikeRepository};

use crate::models::LikeModel;
use crate::pool::DbPool;

use super::error::{like_not_found, map_db_error, map_unique_violation};

/// SQLite implementation of LikeRepository
#[derive(Clone)]
pub struct SqliteLikeRepository {
    pool: DbPool,
}

impl SqliteLikeRepository {
    /// Create a new SqliteLikeRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for SqliteLikeRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: EntityId,
        article_id: EntityId,
    ) -> DomainResult<Option<ArticleLike>> {
        let result = sqlx::query_as::<_, LikeModel>(
            "SELECT user_id, article_id FROM article_likes WHERE user_id = ? AND article_id = ?",
        )
        .bind(user_id.into_inner())
        .bind(article_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ArticleLike::from))
    }

    #[instrument(skip(self), fields(user = %like.user_id, article = %like.article_id))]
    async fn create(&self, like: &ArticleLike) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("INSERT INTO article_likes (user_id, article_id) VALUES (?, ?)")
            .bind(like.user_id.into_inner())
            .bind(like.article_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::AlreadyLiked))?;

        let result =
            sqlx::query("UPDATE articles SET likes_count = likes_count + 1 WHERE id = ?")
                .bind(like.article_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ArticleNotFound(like.article_id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: EntityId, article_id: EntityId) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result =
            sqlx::query("DELETE FROM article_likes WHERE user_id = ? AND article_id = ?")
                .bind(user_id.into_inner())
                .bind(article_id.into_inner())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(like_not_found(user_id, article_id));
        }

        sqlx::query("UPDATE articles SET likes_count = likes_count - 1 WHERE id = ?")
            .bind(article_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: EntityId) -> DomainResult<Vec<ArticleLike>> {
        let results = sqlx::query_as::<_, LikeModel>(
            "SELECT user_id, article_id FROM article_likes WHERE user_id = ?",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ArticleLike::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_for_article(&self, article_id: EntityId) -> DomainResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM article_likes WHERE article_id = ?",
        )
        .bind(article_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}
