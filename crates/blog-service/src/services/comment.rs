//! Comment lifecycle worker

use serde_json::{Map, Value};
use tracing::{info, instrument};

use blog_core::{Comment, CommentQuery, DomainError, DomainResult, EntityId, NewComment};
use blog_media::ImageKind;

use crate::dto::{project_comment, CommentField, CommentPatch, NewCommentData};

use super::context::ServiceContext;

/// Comment lifecycle worker
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment on an existing article
    #[instrument(skip(self, data, image), fields(author = %author, article = %data.article_id))]
    pub async fn create(
        &self,
        author: EntityId,
        data: NewCommentData,
        image: Option<&[u8]>,
    ) -> DomainResult<EntityId> {
        self.ctx
            .article_repo()
            .find_by_id(data.article_id)
            .await?
            .ok_or(DomainError::ArticleNotFound(data.article_id))?;

        let filename = match image {
            Some(bytes) => Some(self.ctx.images().store(bytes, ImageKind::Comment)?),
            None => None,
        };

        let id = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                author,
                article_id: data.article_id,
                text: data.text,
                image: filename,
            })
            .await?;

        info!(comment_id = %id, "comment created");
        Ok(id)
    }

    /// Edit a comment. Editing is owner-only; moderator rights do not
    /// extend to it.
    #[instrument(skip(self, patch, image), fields(comment_id = %comment_id, actor = %actor))]
    pub async fn edit(
        &self,
        comment_id: EntityId,
        actor: EntityId,
        patch: CommentPatch,
        image: Option<&[u8]>,
    ) -> DomainResult<()> {
        let mut comment = self.get(comment_id).await?;

        if comment.author != actor {
            return Err(DomainError::Forbidden);
        }

        if let Some(text) = patch.text {
            comment.text = text;
        }

        // New file first, row second, old file last
        let old_image = match image {
            Some(bytes) => {
                let filename = self.ctx.images().store(bytes, ImageKind::Comment)?;
                comment.image.replace(filename)
            }
            None => None,
        };

        self.ctx.comment_repo().update(&comment).await?;

        if let Some(old) = old_image {
            self.ctx.images().delete(ImageKind::Comment, &old)?;
        }

        info!(comment_id = %comment_id, "comment edited");
        Ok(())
    }

    /// Delete a comment under the deletion hierarchy, cleaning up its image
    /// file before dropping the row
    #[instrument(skip(self), fields(comment_id = %comment_id, actor = %actor))]
    pub async fn delete(&self, comment_id: EntityId, actor: EntityId) -> DomainResult<()> {
        let comment = self.get(comment_id).await?;

        let owner = self
            .ctx
            .user_repo()
            .find_by_id(comment.author)
            .await?
            .ok_or(DomainError::UserNotFound(comment.author))?;
        let acting_user = self
            .ctx
            .user_repo()
            .find_by_id(actor)
            .await?
            .ok_or(DomainError::UserNotFound(actor))?;

        if !blog_core::can_delete(&owner, &acting_user) {
            return Err(DomainError::Forbidden);
        }

        if let Some(image) = &comment.image {
            self.ctx.images().delete(ImageKind::Comment, image)?;
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "comment deleted");
        Ok(())
    }

    /// Fetch a comment or fail with `CommentNotFound`
    pub async fn get(&self, id: EntityId) -> DomainResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::CommentNotFound(id))
    }

    /// Fetch a comment projected onto the requested fields
    #[instrument(skip(self, fields))]
    pub async fn get_projected(
        &self,
        id: EntityId,
        fields: &[CommentField],
    ) -> DomainResult<Map<String, Value>> {
        let comment = self.get(id).await?;
        Ok(project_comment(&comment, fields))
    }

    /// List comments matching the query, projected onto the requested fields
    #[instrument(skip(self, fields))]
    pub async fn get_all(
        &self,
        query: &CommentQuery,
        fields: &[CommentField],
    ) -> DomainResult<Vec<Map<String, Value>>> {
        let comments = self.ctx.comment_repo().list(query).await?;
        Ok(comments
            .iter()
            .map(|comment| project_comment(comment, fields))
            .collect())
    }
}
