//! Scenario helpers built on the fixtures

use blog_core::EntityId;
use blog_service::{NewArticleData, NewCommentData};

use crate::fixtures::{register_data, TestApp};

/// Register a plain user and return their id
pub async fn register_user(app: &TestApp, nickname: &str) -> EntityId {
    app.users()
        .register(register_data(nickname), None)
        .await
        .unwrap()
}

/// Register a user and grant admin rights through the offline channel
pub async fn register_admin(app: &TestApp, nickname: &str) -> EntityId {
    let id = register_user(app, nickname).await;
    app.users().give_admin_rights(id).await.unwrap();
    id
}

/// Register a user and set the moderator flag directly on the store
pub async fn register_moderator(app: &TestApp, nickname: &str) -> EntityId {
    let id = register_user(app, nickname).await;
    app.ctx().user_repo().set_moderator(id, true).await.unwrap();
    id
}

/// Create an article without an image
pub async fn create_article(app: &TestApp, author: EntityId, title: &str) -> EntityId {
    app.articles()
        .create(
            author,
            NewArticleData {
                title: title.to_string(),
                content: "Some content".to_string(),
            },
            None,
        )
        .await
        .unwrap()
}

/// Create a comment without an image
pub async fn create_comment(app: &TestApp, author: EntityId, article_id: EntityId) -> EntityId {
    app.comments()
        .create(
            author,
            NewCommentData {
                article_id,
                text: "A comment".to_string(),
            },
            None,
        )
        .await
        .unwrap()
}
