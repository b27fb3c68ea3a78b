//! Article lifecycle worker

use serde_json::{Map, Value};
use tracing::{info, instrument};

use blog_core::{
    Article, ArticleQuery, DomainError, DomainResult, EntityId, NewArticle,
};
use blog_media::ImageKind;

use crate::dto::{project_article, ArticleField, ArticlePatch, NewArticleData};

use super::context::ServiceContext;

/// Article lifecycle worker
pub struct ArticleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ArticleService<'a> {
    /// Create a new ArticleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an article for `author`, optionally with an attached image.
    /// The image file is written before the row so a crash in between leaves
    /// an orphaned file, never a row pointing at nothing.
    #[instrument(skip(self, data, image), fields(author = %author))]
    pub async fn create(
        &self,
        author: EntityId,
        data: NewArticleData,
        image: Option<&[u8]>,
    ) -> DomainResult<EntityId> {
        self.ctx
            .user_repo()
            .find_by_id(author)
            .await?
            .ok_or(DomainError::UserNotFound(author))?;

        let filename = match image {
            Some(bytes) => Some(self.ctx.images().store(bytes, ImageKind::Article)?),
            None => None,
        };

        let id = self
            .ctx
            .article_repo()
            .create(&NewArticle {
                author,
                title: data.title,
                content: data.content,
                image: filename,
            })
            .await?;

        info!(article_id = %id, "article created");
        Ok(id)
    }

    /// Edit an article. Editing is owner-only; moderator rights do not
    /// extend to it.
    #[instrument(skip(self, patch, image), fields(article_id = %article_id, actor = %actor))]
    pub async fn edit(
        &self,
        article_id: EntityId,
        actor: EntityId,
        patch: ArticlePatch,
        image: Option<&[u8]>,
    ) -> DomainResult<()> {
        let mut article = self.get(article_id).await?;

        if article.author != actor {
            return Err(DomainError::Forbidden);
        }

        if let Some(title) = patch.title {
            article.title = title;
        }
        if let Some(content) = patch.content {
            article.content = content;
        }

        // New file first, row second, old file last
        let old_image = match image {
            Some(bytes) => {
                let filename = self.ctx.images().store(bytes, ImageKind::Article)?;
                article.image.replace(filename)
            }
            None => None,
        };

        self.ctx.article_repo().update(&article).await?;

        if let Some(old) = old_image {
            self.ctx.images().delete(ImageKind::Article, &old)?;
        }

        info!(article_id = %article_id, "article edited");
        Ok(())
    }

    /// Delete an article under the deletion hierarchy. Cleans up the article
    /// image, every comment and its image, and only then drops the row; the
    /// store cascade takes the like rows with it.
    #[instrument(skip(self), fields(article_id = %article_id, actor = %actor))]
    pub async fn delete(&self, article_id: EntityId, actor: EntityId) -> DomainResult<()> {
        let article = self.get(article_id).await?;

        let owner = self
            .ctx
            .user_repo()
            .find_by_id(article.author)
            .await?
            .ok_or(DomainError::UserNotFound(article.author))?;
        let acting_user = self
            .ctx
            .user_repo()
            .find_by_id(actor)
            .await?
            .ok_or(DomainError::UserNotFound(actor))?;

        if !blog_core::can_delete(&owner, &acting_user) {
            return Err(DomainError::Forbidden);
        }

        if let Some(image) = &article.image {
            self.ctx.images().delete(ImageKind::Article, image)?;
        }

        let comments = self
            .ctx
            .comment_repo()
            .list(&blog_core::CommentQuery {
                article: Some(article_id),
                ..blog_core::CommentQuery::default()
            })
            .await?;
        for comment in comments {
            if let Some(image) = &comment.image {
                self.ctx.images().delete(ImageKind::Comment, image)?;
            }
            self.ctx.comment_repo().delete(comment.id).await?;
        }

        self.ctx.article_repo().delete(article_id).await?;

        info!(article_id = %article_id, "article deleted");
        Ok(())
    }

    /// Atomically adjust the like counter
    #[instrument(skip(self), fields(article_id = %article_id))]
    pub async fn update_likes_count(&self, article_id: EntityId, delta: i64) -> DomainResult<()> {
        self.ctx
            .article_repo()
            .update_likes_count(article_id, delta)
            .await
    }

    /// Fetch an article or fail with `ArticleNotFound`
    pub async fn get(&self, id: EntityId) -> DomainResult<Article> {
        self.ctx
            .article_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ArticleNotFound(id))
    }

    /// Fetch an article projected onto the requested fields
    #[instrument(skip(self, fields))]
    pub async fn get_projected(
        &self,
        id: EntityId,
        fields: &[ArticleField],
    ) -> DomainResult<Map<String, Value>> {
        let article = self.get(id).await?;
        Ok(project_article(&article, fields))
    }

    /// List articles matching the query, projected onto the requested fields
    #[instrument(skip(self, fields))]
    pub async fn get_all(
        &self,
        query: &ArticleQuery,
        fields: &[ArticleField],
    ) -> DomainResult<Vec<Map<String, Value>>> {
        let articles = self.ctx.article_repo().list(query).await?;
        Ok(articles
            .iter()
            .map(|article| project_article(article, fields))
            .collect())
    }
}
