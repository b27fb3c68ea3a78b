//! Article like entity <-> model mapper

use blog_core::{ArticleLike, EntityId};

use crate::models::LikeModel;

impl From<LikeModel> for ArticleLike {
    fn from(model: LikeModel) -> Self {
        ArticleLike {
            user_id: EntityId::new(model.user_id),
            article_id: EntityId::new(model.article_id),
        }
    }
}
