//! SQLite implementation of ArticleRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::QueryBuilder;
use tracing::instrument;

use blog_core::{
    Article, ArticleQuery, ArticleRepository, ArticleSort, DomainResult, EntityId, NewArticle,
};

use crate::models::ArticleModel;
use crate::pool::DbPool;

use super::error::{article_not_found, map_db_error};

const ARTICLE_COLUMNS: &str = "id, author, title, content, create_date, image, likes_count";

/// SQLite implementation of ArticleRepository
#[derive(Clone)]
pub struct SqliteArticleRepository {
    pool: DbPool,
}

impl SqliteArticleRepository {
    /// Create a new SqliteArticleRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for SqliteArticleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Article>> {
        let result = sqlx::query_as::<_, ArticleModel>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Article::from))
    }

    #[instrument(skip(self), fields(author = %article.author))]
    async fn create(&self, article: &NewArticle) -> DomainResult<EntityId> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO articles (author, title, content, create_date, image, likes_count)
            VALUES (?, ?, ?, ?, ?, 0)
            RETURNING id
            ",
        )
        .bind(article.author.into_inner())
        .bind(&article.title)
        .bind(&article.content)
        .bind(Utc::now())
        .bind(&article.image)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EntityId::new(id))
    }

    #[instrument(skip(self), fields(id = %article.id))]
    async fn update(&self, article: &Article) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE articles SET title = ?, content = ?, image = ? WHERE id = ?",
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.image)
        .bind(article.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(article_not_found(article.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(article_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_likes_count(&self, id: EntityId, delta: i64) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE articles SET likes_count = likes_count + ? WHERE id = ?")
                .bind(delta)
                .bind(id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(article_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ArticleQuery) -> DomainResult<Vec<Article>> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE 1 = 1"
        ));

        if let Some(author) = query.author {
            builder.push(" AND author = ").push_bind(author.into_inner());
        }

        match query.sort {
            ArticleSort::CreateDate => builder.push(" ORDER BY create_date DESC"),
            ArticleSort::LikesCount => {
                builder.push(" ORDER BY likes_count DESC, create_date DESC")
            }
        };

        builder
            .push(" LIMIT ")
            .push_bind(query.limit.unwrap_or(-1))
            .push(" OFFSET ")
            .push_bind(query.offset.unwrap_or(0));

        let results = builder
            .build_query_as::<ArticleModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Article::from).collect())
    }
}
