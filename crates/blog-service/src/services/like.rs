//! Like lifecycle worker
//!
//! A like is a two-state machine per (user, article) pair: absent or present.
//! The repository keeps the article's counter in step transactionally; this
//! worker adds the duplicate and existence checks in their prescribed order.

use tracing::{info, instrument};

use blog_core::{ArticleLike, DomainError, DomainResult, EntityId};

use super::context::ServiceContext;

/// Like lifecycle worker
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set a like. The duplicate check runs before the article existence
    /// check; liking twice fails with `AlreadyLiked` even if the article is
    /// since gone.
    #[instrument(skip(self), fields(user = %user_id, article = %article_id))]
    pub async fn new_like(&self, user_id: EntityId, article_id: EntityId) -> DomainResult<()> {
        if self
            .ctx
            .like_repo()
            .find(user_id, article_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyLiked);
        }

        self.ctx
            .article_repo()
            .find_by_id(article_id)
            .await?
            .ok_or(DomainError::ArticleNotFound(article_id))?;

        self.ctx
            .like_repo()
            .create(&ArticleLike {
                user_id,
                article_id,
            })
            .await?;

        info!("like set");
        Ok(())
    }

    /// Remove a like. A pair that was never liked fails with `LikeNotFound`.
    #[instrument(skip(self), fields(user = %user_id, article = %article_id))]
    pub async fn delete_like(&self, user_id: EntityId, article_id: EntityId) -> DomainResult<()> {
        self.ctx.like_repo().delete(user_id, article_id).await?;

        info!("like removed");
        Ok(())
    }

    /// Check whether the pair is in the liked state
    #[instrument(skip(self), fields(user = %user_id, article = %article_id))]
    pub async fn like_exists(
        &self,
        user_id: EntityId,
        article_id: EntityId,
    ) -> DomainResult<bool> {
        Ok(self
            .ctx
            .like_repo()
            .find(user_id, article_id)
            .await?
            .is_some())
    }
}
