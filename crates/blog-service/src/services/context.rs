//! Service context - dependency container for the lifecycle workers
//!
//! Holds the repositories and the image store. Workers borrow the context and
//! reach their dependencies through the accessors.

use std::sync::Arc;

use blog_core::traits::{ArticleRepository, CommentRepository, LikeRepository, UserRepository};
use blog_db::{
    DbPool, SqliteArticleRepository, SqliteCommentRepository, SqliteLikeRepository,
    SqliteUserRepository,
};
use blog_media::ImageStore;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    article_repo: Arc<dyn ArticleRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    like_repo: Arc<dyn LikeRepository>,
    images: Arc<ImageStore>,
}

impl ServiceContext {
    /// Create a new service context from explicit dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        article_repo: Arc<dyn ArticleRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        like_repo: Arc<dyn LikeRepository>,
        images: Arc<ImageStore>,
    ) -> Self {
        Self {
            user_repo,
            article_repo,
            comment_repo,
            like_repo,
            images,
        }
    }

    /// Wire a context over the SQLite repositories sharing one pool
    pub fn from_pool(pool: DbPool, images: ImageStore) -> Self {
        Self::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteArticleRepository::new(pool.clone())),
            Arc::new(SqliteCommentRepository::new(pool.clone())),
            Arc::new(SqliteLikeRepository::new(pool)),
            Arc::new(images),
        )
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the article repository
    pub fn article_repo(&self) -> &dyn ArticleRepository {
        self.article_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the like repository
    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    /// Get the image store
    pub fn images(&self) -> &ImageStore {
        self.images.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("images", &self.images)
            .finish()
    }
}
