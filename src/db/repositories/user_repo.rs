//! User repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, types::Json};

use crate::{
    error::{AppError, AppResult},
    models::{Preferences, User},
};

/// Persistence capability for users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert when `id == 0` (assigning the new id), update otherwise
    async fn store(&self, user: &mut User) -> AppResult<()>;

    /// Replace the stored password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> AppResult<User>;
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    display_name: String,
    password: String,
    role: String,
    preferences: Json<Preferences>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            password: row.password,
            role: row
                .role
                .parse()
                .map_err(|_| AppError::Database(format!("unknown role in users table: {}", row.role)))?,
            preferences: row.preferences.0,
        })
    }
}

/// Maps a violation of the unique email constraint to a domain error
fn email_conflict(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::AlreadyExists("A user with this email already exists".to_string())
        }
        _ => err.into(),
    }
}

/// Postgres-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn store(&self, user: &mut User) -> AppResult<()> {
        if user.id == 0 {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO users (email, display_name, password, role, preferences)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(&user.password)
            .bind(user.role.as_str())
            .bind(Json(&user.preferences))
            .fetch_one(&self.pool)
            .await
            .map_err(email_conflict)?;

            user.id = id;
            return Ok(());
        }

        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                email = $2,
                display_name = $3,
                role = $4,
                preferences = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(user.role.as_str())
        .bind(Json(&user.preferences))
        .execute(&self.pool)
        .await
        .map_err(email_conflict)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }

        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, display_name, password, role, preferences
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, display_name, password, role, preferences
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

        row.try_into()
    }
}
