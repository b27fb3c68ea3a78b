//! SQLite implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::QueryBuilder;
use tracing::instrument;

use blog_core::{
    DomainResult, EntityId, NewUser, NicknameFilter, User, UserQuery, UserRepository, UserSort,
};

use crate::models::UserModel;
use crate::pool::DbPool;

use super::error::{map_db_error, map_unique_violation, user_not_found};

const USER_COLUMNS: &str = "id, surname, name, nickname, email, password_hash, modified_date, \
                            avatar, description, is_moderator, is_admin";

/// SQLite implementation of UserRepository
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    /// Create a new SqliteUserRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: EntityId) -> DomainResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: &str, exclude: Option<EntityId>) -> DomainResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND id != ?)",
        )
        .bind(email)
        .bind(exclude.map_or(-1, EntityId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn nickname_taken(
        &self,
        nickname: &str,
        exclude: Option<EntityId>,
    ) -> DomainResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE nickname = ? AND id != ?)",
        )
        .bind(nickname)
        .bind(exclude.map_or(-1, EntityId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash), fields(nickname = %user.nickname))]
    async fn create(&self, user: &NewUser, password_hash: &str) -> DomainResult<EntityId> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO users (surname, name, nickname, email, password_hash, modified_date,
                               avatar, description, is_moderator, is_admin)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, 0)
            RETURNING id
            ",
        )
        .bind(&user.surname)
        .bind(&user.name)
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(password_hash)
        .bind(Utc::now())
        .bind(&user.avatar)
        .bind(&user.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || blog_core::DomainError::UserAlreadyExists))?;

        Ok(EntityId::new(id))
    }

    #[instrument(skip(self), fields(id = %user.id))]
    async fn update(&self, user: &User) -> DomainResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET surname = ?, name = ?, nickname = ?, email = ?, avatar = ?,
                description = ?, modified_date = ?
            WHERE id = ?
            ",
        )
        .bind(&user.surname)
        .bind(&user.name)
        .bind(&user.nickname)
        .bind(&user.email)
        .bind(&user.avatar)
        .bind(&user.description)
        .bind(user.modified_date)
        .bind(user.id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: EntityId) -> DomainResult<Option<String>> {
        let result =
            sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = ?")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: EntityId, password_hash: &str) -> DomainResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = ?, modified_date = ? WHERE id = ?")
                .bind(password_hash)
                .bind(Utc::now())
                .bind(id.into_inner())
                .execute(&self.pool)
                .await
                .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_moderator(&self, id: EntityId, is_moderator: bool) -> DomainResult<()> {
        let result = sqlx::query("UPDATE users SET is_moderator = ? WHERE id = ?")
            .bind(is_moderator)
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_admin(&self, id: EntityId, is_admin: bool) -> DomainResult<()> {
        let result = sqlx::query("UPDATE users SET is_admin = ? WHERE id = ?")
            .bind(is_admin)
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EntityId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &UserQuery) -> DomainResult<Vec<User>> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE 1 = 1"));

        if let Some(search) = &query.nickname_search {
            // SQLite LIKE is case-insensitive for ASCII, which gives the
            // case-insensitive exact mode a plain LIKE without wildcards.
            match query.nickname_filter {
                NicknameFilter::Equals => {
                    builder.push(" AND nickname = ").push_bind(search.clone());
                }
                NicknameFilter::EqualsCaseInsensitive => {
                    builder.push(" AND nickname LIKE ").push_bind(search.clone());
                }
                NicknameFilter::Starts => {
                    builder
                        .push(" AND nickname LIKE ")
                        .push_bind(format!("{search}%"));
                }
                NicknameFilter::Ends => {
                    builder
                        .push(" AND nickname LIKE ")
                        .push_bind(format!("%{search}"));
                }
                NicknameFilter::Contains => {
                    builder
                        .push(" AND nickname LIKE ")
                        .push_bind(format!("%{search}%"));
                }
            }
        }

        match query.sort {
            UserSort::Id => builder.push(" ORDER BY id"),
            UserSort::Nickname => builder.push(" ORDER BY nickname"),
        };

        // SQLite requires a LIMIT clause before OFFSET; -1 means unbounded
        builder
            .push(" LIMIT ")
            .push_bind(query.limit.unwrap_or(-1))
            .push(" OFFSET ")
            .push_bind(query.offset.unwrap_or(0));

        let results = builder
            .build_query_as::<UserModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteUserRepository>();
    }
}
