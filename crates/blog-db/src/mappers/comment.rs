//! Comment entity <-> model mapper

use blog_core::{Comment, EntityId};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: EntityId::new(model.id),
            author: EntityId::new(model.author),
            article_id: EntityId::new(model.article_id),
            text: model.text,
            image: model.image,
            create_date: model.create_date,
        }
    }
}
