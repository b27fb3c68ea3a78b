//! User entity <-> model mapper
//!
//! The password hash never leaves this crate as part of the entity; it is
//! fetched separately through `get_password_hash`.

use blog_core::{EntityId, User};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: EntityId::new(model.id),
            name: model.name,
            surname: model.surname,
            nickname: model.nickname,
            email: model.email,
            avatar: model.avatar,
            description: model.description,
            is_moderator: model.is_moderator,
            is_admin: model.is_admin,
            modified_date: model.modified_date,
        }
    }
}
