use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::db::models::{NewUser, ProfileUpdate, UserRow};
use crate::db::store::{UserStore, UserWriteError};

const USER_COLUMNS: &str = "id, name, last_name, email, location, password_hash";

/// Repository for User database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, user: NewUser<'_>) -> Result<UserRow, UserWriteError> {
        debug!("Creating user: email={}", user.email);

        sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, last_name, email, location, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.location)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_profile(
        &self,
        id: i32,
        profile: ProfileUpdate<'_>,
    ) -> Result<Option<UserRow>, UserWriteError> {
        debug!("Updating user profile: id={}", id);

        sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, last_name = $3, email = $4, location = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(profile.name)
        .bind(profile.last_name)
        .bind(profile.email)
        .bind(profile.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)
    }
}

fn write_error(err: sqlx::Error) -> UserWriteError {
    if is_unique_violation(&err) {
        UserWriteError::EmailTaken
    } else {
        UserWriteError::Store(err)
    }
}

/// `true` when `err` is a unique-constraint violation (SQLSTATE 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
