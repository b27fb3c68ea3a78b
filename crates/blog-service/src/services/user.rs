//! User lifecycle worker
//!
//! Registration and profile edits run their checks in a fixed order so the
//! first failing check names the error the caller sees. Edits and account
//! deletion are gated on re-authentication with the current password.

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use blog_common::{hash_password, verify_password, AppError};
use blog_core::validation::{check_email, check_nickname, check_password};
use blog_core::{can_assign_moderator, DomainError, DomainResult, EntityId, NewUser, User, UserQuery};
use blog_media::ImageKind;

use crate::dto::{project_user, RegisterData, UserField, UserPatch};

use super::context::ServiceContext;

fn hashing_failed(e: AppError) -> DomainError {
    DomainError::InternalError(e.to_string())
}

/// User lifecycle worker
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user.
    ///
    /// Check order: password confirmation, password shape, nickname shape,
    /// email shape, email uniqueness, nickname uniqueness. Only then is the
    /// password hashed, the avatar stored, and the row written.
    #[instrument(skip(self, data, avatar), fields(nickname = %data.nickname, email = %data.email))]
    pub async fn register(
        &self,
        data: RegisterData,
        avatar: Option<&[u8]>,
    ) -> DomainResult<EntityId> {
        if data.password != data.password_again {
            return Err(DomainError::PasswordMismatch);
        }
        check_password(&data.password)?;
        check_nickname(&data.nickname)?;
        check_email(&data.email)?;

        if self.ctx.user_repo().email_taken(&data.email, None).await? {
            return Err(DomainError::EmailAlreadyInUse);
        }
        if self
            .ctx
            .user_repo()
            .nickname_taken(&data.nickname, None)
            .await?
        {
            return Err(DomainError::UserAlreadyExists);
        }

        let password_hash = hash_password(&data.password).map_err(hashing_failed)?;

        let filename = match avatar {
            Some(bytes) => Some(self.ctx.images().store(bytes, ImageKind::Avatar)?),
            None => None,
        };

        let id = self
            .ctx
            .user_repo()
            .create(
                &NewUser {
                    name: data.name,
                    surname: data.surname,
                    nickname: data.nickname,
                    email: data.email,
                    avatar: filename,
                    description: data.description,
                },
                &password_hash,
            )
            .await?;

        info!(user_id = %id, "user registered");
        Ok(id)
    }

    /// Authenticate by email and password. Unknown email and wrong password
    /// both fail with `IncorrectPassword`; which one it was is not revealed.
    /// Session issuance belongs to the presentation layer.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                warn!("login failed: unknown email");
                DomainError::IncorrectPassword
            })?;

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(DomainError::IncorrectPassword)?;

        if !verify_password(password, &hash).map_err(hashing_failed)? {
            warn!(user_id = %user.id, "login failed: wrong password");
            return Err(DomainError::IncorrectPassword);
        }

        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    /// Edit a profile. The current password gates the whole operation;
    /// uniqueness checks (excluding the user's own row) run before shape
    /// checks, and a new password must pass the shape check before the
    /// confirmation comparison.
    #[instrument(skip(self, patch, avatar), fields(user_id = %user_id))]
    pub async fn edit(
        &self,
        user_id: EntityId,
        patch: UserPatch,
        avatar: Option<&[u8]>,
    ) -> DomainResult<()> {
        let mut user = self.get(user_id).await?;
        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !verify_password(&patch.password, &hash).map_err(hashing_failed)? {
            return Err(DomainError::IncorrectPassword);
        }

        if let Some(email) = &patch.email {
            if self.ctx.user_repo().email_taken(email, Some(user_id)).await? {
                return Err(DomainError::EmailAlreadyInUse);
            }
        }
        if let Some(nickname) = &patch.nickname {
            if self
                .ctx
                .user_repo()
                .nickname_taken(nickname, Some(user_id))
                .await?
            {
                return Err(DomainError::UserAlreadyExists);
            }
        }

        if let Some(nickname) = &patch.nickname {
            check_nickname(nickname)?;
        }
        if let Some(email) = &patch.email {
            check_email(email)?;
        }
        if let Some(new_password) = &patch.new_password {
            check_password(new_password)?;
            if patch.new_password_again.as_deref() != Some(new_password.as_str()) {
                return Err(DomainError::PasswordMismatch);
            }
        }

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(surname) = patch.surname {
            user.surname = surname;
        }
        if let Some(nickname) = patch.nickname {
            user.nickname = nickname;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(description) = patch.description {
            user.description = Some(description);
        }
        user.modified_date = Utc::now();

        // New file first, row second, old file last
        let old_avatar = match avatar {
            Some(bytes) => {
                let filename = self.ctx.images().store(bytes, ImageKind::Avatar)?;
                user.avatar.replace(filename)
            }
            None => None,
        };

        self.ctx.user_repo().update(&user).await?;

        if let Some(new_password) = &patch.new_password {
            let new_hash = hash_password(new_password).map_err(hashing_failed)?;
            self.ctx.user_repo().update_password(user_id, &new_hash).await?;
        }

        if let Some(old) = old_avatar {
            self.ctx.images().delete(ImageKind::Avatar, &old)?;
        }

        info!(user_id = %user_id, "user edited");
        Ok(())
    }

    /// Delete an account after re-authentication. Removes the avatar file,
    /// unwinds the user's likes through the like worker so foreign counters
    /// stay honest, and drops the row; the store cascade takes the user's
    /// articles, comments, and incoming likes with it.
    #[instrument(skip(self, password), fields(user_id = %user_id))]
    pub async fn delete(&self, user_id: EntityId, password: &str) -> DomainResult<()> {
        let user = self.get(user_id).await?;
        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !verify_password(password, &hash).map_err(hashing_failed)? {
            return Err(DomainError::IncorrectPassword);
        }

        if let Some(avatar) = &user.avatar {
            self.ctx.images().delete(ImageKind::Avatar, avatar)?;
        }

        for like in self.ctx.like_repo().find_by_user(user_id).await? {
            self.ctx
                .like_repo()
                .delete(like.user_id, like.article_id)
                .await?;
        }

        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }

    /// Grant the moderator flag. The actor must be an admin and the target
    /// must not be one.
    #[instrument(skip(self), fields(target = %target_id, actor = %actor_id))]
    pub async fn make_moderator(
        &self,
        target_id: EntityId,
        actor_id: EntityId,
    ) -> DomainResult<()> {
        self.assign_moderator_flag(target_id, actor_id, true).await
    }

    /// Clear the moderator flag under the same rule as granting it
    #[instrument(skip(self), fields(target = %target_id, actor = %actor_id))]
    pub async fn make_simple_user(
        &self,
        target_id: EntityId,
        actor_id: EntityId,
    ) -> DomainResult<()> {
        self.assign_moderator_flag(target_id, actor_id, false).await
    }

    async fn assign_moderator_flag(
        &self,
        target_id: EntityId,
        actor_id: EntityId,
        value: bool,
    ) -> DomainResult<()> {
        let target = self.get(target_id).await?;
        let actor = self.get(actor_id).await?;

        if !can_assign_moderator(&target, &actor) {
            return Err(DomainError::Forbidden);
        }

        self.ctx.user_repo().set_moderator(target_id, value).await?;

        info!(target = %target_id, value, "moderator flag changed");
        Ok(())
    }

    /// Grant admin rights. No actor gate: this is only reachable through the
    /// offline admin channel.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn give_admin_rights(&self, user_id: EntityId) -> DomainResult<()> {
        self.ctx.user_repo().set_admin(user_id, true).await?;
        info!(user_id = %user_id, "admin rights granted");
        Ok(())
    }

    /// Revoke admin rights. No actor gate, as with granting.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn revoke_admin_rights(&self, user_id: EntityId) -> DomainResult<()> {
        self.ctx.user_repo().set_admin(user_id, false).await?;
        info!(user_id = %user_id, "admin rights revoked");
        Ok(())
    }

    /// Fetch a user or fail with `UserNotFound`
    pub async fn get(&self, id: EntityId) -> DomainResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    /// Fetch a user projected onto the requested fields
    #[instrument(skip(self, fields))]
    pub async fn get_projected(
        &self,
        id: EntityId,
        fields: &[UserField],
    ) -> DomainResult<Map<String, Value>> {
        let user = self.get(id).await?;
        Ok(project_user(&user, fields))
    }

    /// List users matching the query, projected onto the requested fields
    #[instrument(skip(self, fields))]
    pub async fn get_all(
        &self,
        query: &UserQuery,
        fields: &[UserField],
    ) -> DomainResult<Vec<Map<String, Value>>> {
        let users = self.ctx.user_repo().search(query).await?;
        Ok(users.iter().map(|user| project_user(user, fields)).collect())
    }
}
