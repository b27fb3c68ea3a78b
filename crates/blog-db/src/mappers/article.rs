//! Article entity <-> model mapper

use blog_core::{Article, EntityId};

use crate::models::ArticleModel;

impl From<ArticleModel> for Article {
    fn from(model: ArticleModel) -> Self {
        Article {
            id: EntityId::new(model.id),
            author: EntityId::new(model.author),
            title: model.title,
            content: model.content,
            image: model.image,
            likes_count: model.likes_count,
            create_date: model.create_date,
        }
    }
}
