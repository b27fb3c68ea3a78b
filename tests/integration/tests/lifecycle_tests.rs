//! End-to-end lifecycle tests over the in-memory store
//!
//! Covers the deletion hierarchy, the like state machine and its counter,
//! cascades with image cleanup, registration error precedence, and the
//! re-authentication gates.

use blog_core::{DomainError, EntityId, UserQuery};
use blog_service::{ArticlePatch, NewArticleData, NewCommentData, UserPatch};
use integration_tests::{
    create_article, create_comment, png_bytes, register_admin, register_data, register_moderator,
    register_user, TestApp, PASSWORD,
};

fn patch_with_password(password: &str) -> UserPatch {
    UserPatch {
        password: password.to_string(),
        name: None,
        surname: None,
        nickname: None,
        email: None,
        description: None,
        new_password: None,
        new_password_again: None,
    }
}

// ============================================================================
// Deletion hierarchy
// ============================================================================

#[tokio::test]
async fn test_deletion_hierarchy_role_table() {
    // (owner role, actor role, allowed) for distinct owner and actor
    let table = [
        ("plain", "plain", false),
        ("plain", "moderator", true),
        ("plain", "admin", true),
        ("moderator", "plain", false),
        ("moderator", "moderator", false),
        ("moderator", "admin", true),
        ("admin", "plain", false),
        ("admin", "moderator", false),
        ("admin", "admin", false),
    ];

    for (i, (owner_role, actor_role, allowed)) in table.into_iter().enumerate() {
        let app = TestApp::spawn().await;

        let register_role = |role: &'static str, nickname: String| {
            let app = &app;
            async move {
                match role {
                    "plain" => register_user(app, &nickname).await,
                    "moderator" => register_moderator(app, &nickname).await,
                    "admin" => register_admin(app, &nickname).await,
                    other => unreachable!("unknown role {other}"),
                }
            }
        };

        let owner = register_role(owner_role, format!("owner{i}")).await;
        let actor = register_role(actor_role, format!("actor{i}")).await;

        let article = create_article(&app, owner, "Post").await;
        let comment = create_comment(&app, owner, article).await;

        let result = app.comments().delete(comment, actor).await;
        if allowed {
            assert!(
                result.is_ok(),
                "{actor_role} should delete {owner_role}-owned comment"
            );
        } else {
            assert!(
                matches!(result, Err(DomainError::Forbidden)),
                "{actor_role} should not delete {owner_role}-owned comment"
            );
        }
    }
}

#[tokio::test]
async fn test_owner_always_deletes_own_content() {
    let app = TestApp::spawn().await;

    for (i, nickname) in ["plain0", "mod0", "admin0"].into_iter().enumerate() {
        let owner = match i {
            0 => register_user(&app, nickname).await,
            1 => register_moderator(&app, nickname).await,
            _ => register_admin(&app, nickname).await,
        };
        let article = create_article(&app, owner, "Mine").await;
        let comment = create_comment(&app, owner, article).await;

        app.comments().delete(comment, owner).await.unwrap();
        app.articles().delete(article, owner).await.unwrap();
    }
}

#[tokio::test]
async fn test_moderator_forbidden_admin_owner_allowed_on_admin_comment() {
    let app = TestApp::spawn().await;
    let admin = register_admin(&app, "admin").await;
    let moderator = register_moderator(&app, "moderator").await;

    let article = create_article(&app, admin, "Announcement").await;
    let comment = create_comment(&app, admin, article).await;

    let err = app.comments().delete(comment, moderator).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    app.comments().delete(comment, admin).await.unwrap();
}

#[tokio::test]
async fn test_editing_is_owner_only_even_for_admins() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let admin = register_admin(&app, "admin").await;

    let article = create_article(&app, alice, "Original").await;

    let err = app
        .articles()
        .edit(
            article,
            admin,
            ArticlePatch {
                title: Some("Hijacked".to_string()),
                content: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    assert_eq!(app.articles().get(article).await.unwrap().title, "Original");
}

// ============================================================================
// Like state machine
// ============================================================================

#[tokio::test]
async fn test_like_then_unlike_restores_counter() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let article = create_article(&app, alice, "Post").await;

    // A non-zero starting count from another user
    app.likes().new_like(alice, article).await.unwrap();
    let before = app.articles().get(article).await.unwrap().likes_count;

    app.likes().new_like(bob, article).await.unwrap();
    assert_eq!(
        app.articles().get(article).await.unwrap().likes_count,
        before + 1
    );

    app.likes().delete_like(bob, article).await.unwrap();
    assert_eq!(
        app.articles().get(article).await.unwrap().likes_count,
        before
    );
}

#[tokio::test]
async fn test_duplicate_like_rejected_without_counter_drift() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;
    let article = create_article(&app, alice, "Post").await;

    app.likes().new_like(bob, article).await.unwrap();
    let err = app.likes().new_like(bob, article).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyLiked));

    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 1);
}

#[tokio::test]
async fn test_unlike_without_like_fails() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let article = create_article(&app, alice, "Post").await;

    let err = app.likes().delete_like(alice, article).await.unwrap_err();
    assert!(matches!(err, DomainError::LikeNotFound { .. }));
}

#[tokio::test]
async fn test_like_exists_tracks_the_state() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let article = create_article(&app, alice, "Post").await;

    assert!(!app.likes().like_exists(alice, article).await.unwrap());
    app.likes().new_like(alice, article).await.unwrap();
    assert!(app.likes().like_exists(alice, article).await.unwrap());
    app.likes().delete_like(alice, article).await.unwrap();
    assert!(!app.likes().like_exists(alice, article).await.unwrap());
}

// ============================================================================
// Cascades and image cleanup
// ============================================================================

#[tokio::test]
async fn test_article_delete_cleans_comments_likes_and_files() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let article = app
        .articles()
        .create(
            alice,
            NewArticleData {
                title: "Illustrated".to_string(),
                content: "Content".to_string(),
            },
            Some(&png_bytes()),
        )
        .await
        .unwrap();
    let comment = app
        .comments()
        .create(
            bob,
            NewCommentData {
                article_id: article,
                text: "Nice".to_string(),
            },
            Some(&png_bytes()),
        )
        .await
        .unwrap();
    app.likes().new_like(bob, article).await.unwrap();

    assert_eq!(app.stored_file_count(), 2);

    app.articles().delete(article, alice).await.unwrap();

    assert!(matches!(
        app.articles().get(article).await,
        Err(DomainError::ArticleNotFound(_))
    ));
    assert!(matches!(
        app.comments().get(comment).await,
        Err(DomainError::CommentNotFound(_))
    ));
    assert!(!app.likes().like_exists(bob, article).await.unwrap());
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_user_delete_unwinds_likes_and_avatar() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let bob = app
        .users()
        .register(register_data("bob"), Some(&png_bytes()))
        .await
        .unwrap();

    let article = create_article(&app, alice, "Post").await;
    app.likes().new_like(bob, article).await.unwrap();
    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 1);

    app.users().delete(bob, PASSWORD).await.unwrap();

    // The foreign counter is unwound and the avatar file is gone
    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 0);
    assert_eq!(app.stored_file_count(), 0);
    assert!(matches!(
        app.users().get(bob).await,
        Err(DomainError::UserNotFound(_))
    ));
}

#[tokio::test]
async fn test_user_delete_cascades_own_content() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    let article = create_article(&app, alice, "Post").await;
    let comment = create_comment(&app, alice, article).await;
    app.likes().new_like(bob, article).await.unwrap();

    app.users().delete(alice, PASSWORD).await.unwrap();

    assert!(app.articles().get(article).await.is_err());
    assert!(app.comments().get(comment).await.is_err());
    assert!(!app.likes().like_exists(bob, article).await.unwrap());
}

#[tokio::test]
async fn test_avatar_replacement_deletes_the_old_file() {
    let app = TestApp::spawn().await;
    let alice = app
        .users()
        .register(register_data("alice"), Some(&png_bytes()))
        .await
        .unwrap();
    let first = app.users().get(alice).await.unwrap().avatar.unwrap();

    app.users()
        .edit(alice, patch_with_password(PASSWORD), Some(&png_bytes()))
        .await
        .unwrap();

    let second = app.users().get(alice).await.unwrap().avatar.unwrap();
    assert_ne!(first, second);
    assert_eq!(app.stored_file_count(), 1);
}

// ============================================================================
// Registration error precedence
// ============================================================================

#[tokio::test]
async fn test_register_mismatch_beats_uniqueness() {
    let app = TestApp::spawn().await;
    register_user(&app, "alice").await;

    // Colliding nickname AND email, but mismatched confirmation: the
    // mismatch must surface before any uniqueness check runs
    let mut data = register_data("alice");
    data.password_again = "something else".to_string();
    let err = app.users().register(data, None).await.unwrap_err();
    assert!(matches!(err, DomainError::PasswordMismatch));
}

#[tokio::test]
async fn test_register_shape_check_order() {
    let app = TestApp::spawn().await;

    // Bad password and bad nickname: password shape is checked first
    let mut data = register_data("x");
    data.password = "short".to_string();
    data.password_again = "short".to_string();
    let err = app.users().register(data, None).await.unwrap_err();
    assert!(matches!(err, DomainError::IncorrectPasswordLength));

    // Bad nickname and bad email: nickname shape is checked first
    let mut data = register_data("x");
    data.email = "not-an-email".to_string();
    let err = app.users().register(data, None).await.unwrap_err();
    assert!(matches!(err, DomainError::IncorrectNicknameLength));

    let mut data = register_data("charlie");
    data.email = "not-an-email".to_string();
    let err = app.users().register(data, None).await.unwrap_err();
    assert!(matches!(err, DomainError::IncorrectEmailFormat));
}

#[tokio::test]
async fn test_register_uniqueness_conflicts() {
    let app = TestApp::spawn().await;
    register_user(&app, "alice").await;

    // Same email, fresh nickname
    let mut data = register_data("newcomer");
    data.email = "alice@example.com".to_string();
    let err = app.users().register(data, None).await.unwrap_err();
    assert!(matches!(err, DomainError::EmailAlreadyInUse));

    // Same nickname, fresh email
    let mut data = register_data("alice");
    data.email = "fresh@example.com".to_string();
    let err = app.users().register(data, None).await.unwrap_err();
    assert!(matches!(err, DomainError::UserAlreadyExists));
}

#[tokio::test]
async fn test_bad_image_payload_fails_registration_cleanly() {
    let app = TestApp::spawn().await;

    let err = app
        .users()
        .register(register_data("alice"), Some(b"not an image"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::IncorrectImage));

    // Nothing persisted, nothing written
    assert_eq!(app.stored_file_count(), 0);
    let found = app
        .users()
        .get_all(&UserQuery::default(), &[])
        .await
        .unwrap();
    assert!(found.is_empty());
}

// ============================================================================
// Re-authentication gates
// ============================================================================

#[tokio::test]
async fn test_edit_requires_current_password() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;

    let mut patch = patch_with_password("wrong password");
    patch.nickname = Some("renamed".to_string());
    let err = app.users().edit(alice, patch, None).await.unwrap_err();
    assert!(matches!(err, DomainError::IncorrectPassword));

    assert_eq!(app.users().get(alice).await.unwrap().nickname, "alice");
}

#[tokio::test]
async fn test_edit_uniqueness_excludes_own_row() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    register_user(&app, "bob").await;

    // Re-submitting one's own nickname is not a conflict
    let mut patch = patch_with_password(PASSWORD);
    patch.nickname = Some("alice".to_string());
    app.users().edit(alice, patch, None).await.unwrap();

    // Someone else's nickname is
    let mut patch = patch_with_password(PASSWORD);
    patch.nickname = Some("bob".to_string());
    let err = app.users().edit(alice, patch, None).await.unwrap_err();
    assert!(matches!(err, DomainError::UserAlreadyExists));
}

#[tokio::test]
async fn test_edit_new_password_shape_before_mismatch() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;

    let mut patch = patch_with_password(PASSWORD);
    patch.new_password = Some("short".to_string());
    patch.new_password_again = Some("different".to_string());
    let err = app.users().edit(alice, patch, None).await.unwrap_err();
    assert!(matches!(err, DomainError::IncorrectPasswordLength));

    let mut patch = patch_with_password(PASSWORD);
    patch.new_password = Some("long enough secret".to_string());
    patch.new_password_again = Some("but not the same".to_string());
    let err = app.users().edit(alice, patch, None).await.unwrap_err();
    assert!(matches!(err, DomainError::PasswordMismatch));
}

#[tokio::test]
async fn test_edit_changes_password_and_bumps_modified_date() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;
    let before = app.users().get(alice).await.unwrap().modified_date;

    let mut patch = patch_with_password(PASSWORD);
    patch.new_password = Some("a brand new secret".to_string());
    patch.new_password_again = Some("a brand new secret".to_string());
    app.users().edit(alice, patch, None).await.unwrap();

    assert!(app.users().get(alice).await.unwrap().modified_date >= before);

    let err = app
        .users()
        .login("alice@example.com", PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::IncorrectPassword));
    let user = app
        .users()
        .login("alice@example.com", "a brand new secret")
        .await
        .unwrap();
    assert_eq!(user.id, alice);
}

#[tokio::test]
async fn test_account_delete_requires_password() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;

    let err = app.users().delete(alice, "wrong password").await.unwrap_err();
    assert!(matches!(err, DomainError::IncorrectPassword));
    assert!(app.users().get(alice).await.is_ok());
}

#[tokio::test]
async fn test_login_does_not_reveal_which_credential_failed() {
    let app = TestApp::spawn().await;
    register_user(&app, "alice").await;

    let unknown = app
        .users()
        .login("ghost@example.com", PASSWORD)
        .await
        .unwrap_err();
    let wrong = app
        .users()
        .login("alice@example.com", "wrong password")
        .await
        .unwrap_err();
    assert!(matches!(unknown, DomainError::IncorrectPassword));
    assert!(matches!(wrong, DomainError::IncorrectPassword));
}

// ============================================================================
// Role assignment
// ============================================================================

#[tokio::test]
async fn test_moderator_assignment_rule() {
    let app = TestApp::spawn().await;
    let admin = register_admin(&app, "admin").await;
    let other_admin = register_admin(&app, "admin2").await;
    let alice = register_user(&app, "alice").await;
    let bob = register_user(&app, "bob").await;

    // Plain actors cannot assign
    let err = app.users().make_moderator(alice, bob).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    // Admins can, and can revert
    app.users().make_moderator(alice, admin).await.unwrap();
    assert!(app.users().get(alice).await.unwrap().is_moderator);
    app.users().make_simple_user(alice, admin).await.unwrap();
    assert!(!app.users().get(alice).await.unwrap().is_moderator);

    // Admins cannot be demoted through this path
    let err = app
        .users()
        .make_simple_user(other_admin, admin)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn test_admin_rights_are_ungated_but_need_a_target() {
    let app = TestApp::spawn().await;
    let alice = register_user(&app, "alice").await;

    app.users().give_admin_rights(alice).await.unwrap();
    assert!(app.users().get(alice).await.unwrap().is_admin);
    app.users().revoke_admin_rights(alice).await.unwrap();
    assert!(!app.users().get(alice).await.unwrap().is_admin);

    let err = app
        .users()
        .give_admin_rights(EntityId::new(9999))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound(_)));
}

// ============================================================================
// End-to-end scenario
// ============================================================================

#[tokio::test]
async fn test_full_article_lifecycle_scenario() {
    let app = TestApp::spawn().await;

    // Alice registers; a second registration under her nickname fails
    let alice = register_user(&app, "alice").await;
    let mut clash = register_data("alice");
    clash.email = "someone_else@example.com".to_string();
    let err = app.users().register(clash, None).await.unwrap_err();
    assert!(matches!(err, DomainError::UserAlreadyExists));
    let bob = register_user(&app, "bob").await;

    // Alice posts an illustrated article
    let article = app
        .articles()
        .create(
            alice,
            NewArticleData {
                title: "Hello".to_string(),
                content: "World".to_string(),
            },
            Some(&png_bytes()),
        )
        .await
        .unwrap();
    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 0);

    // Bob toggles his like
    app.likes().new_like(bob, article).await.unwrap();
    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 1);
    let err = app.likes().new_like(bob, article).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyLiked));
    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 1);
    app.likes().delete_like(bob, article).await.unwrap();
    assert_eq!(app.articles().get(article).await.unwrap().likes_count, 0);

    // Bob comments; Alice deletes her article and everything goes with it
    let comment = create_comment(&app, bob, article).await;
    app.articles().delete(article, alice).await.unwrap();

    assert!(app.comments().get(comment).await.is_err());
    assert!(!app.likes().like_exists(bob, article).await.unwrap());
    assert_eq!(app.stored_file_count(), 0);
}
