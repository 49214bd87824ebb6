use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::repo_types::User;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("user not found")]
    NotFound,
    #[error("email already registered")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage of user records. Implementations enforce email uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist `user` and return the stored record with its assigned id.
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError>;

    /// Not found is reported as an error.
    async fn get_user_by_email(&self, email: &str) -> Result<User, RepositoryError>;
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create_user(&self, user: &User) -> Result<User, RepositoryError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password)
            VALUES ($1, $2)
            RETURNING id, email, password
            "#,
        )
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => RepositoryError::Conflict,
            other => RepositoryError::Database(other),
        })?;
        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}
