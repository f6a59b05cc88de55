//! Contest repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::Contest,
};

/// Name of the partial unique index allowing a single open contest
pub const SINGLE_OPEN_CONTEST_INDEX: &str = "contests_single_open_idx";

/// Persistence capability for contests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestRepository: Send + Sync {
    /// Insert when `id == 0` (assigning the new id), update otherwise.
    ///
    /// Fails with `OpenContestAlreadyExists` if the write would leave two
    /// contests open.
    async fn store(&self, contest: &mut Contest) -> AppResult<()>;

    /// IDs of every open contest
    async fn get_open_contests(&self) -> AppResult<Vec<i64>>;

    /// IDs of open contests whose window contains the current time
    async fn get_running_contests(&self) -> AppResult<Vec<i64>>;

    /// All contests, newest first; `NotFound` when there are none
    async fn find_all(&self) -> AppResult<Vec<Contest>>;

    /// The `count` most recently started contests
    async fn find_recent(&self, count: i64) -> AppResult<Vec<Contest>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Contest>;
}

fn open_conflict(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation()
                && db_err.constraint() == Some(SINGLE_OPEN_CONTEST_INDEX) =>
        {
            AppError::OpenContestAlreadyExists
        }
        _ => err.into(),
    }
}

/// Postgres-backed contest repository
#[derive(Clone)]
pub struct PgContestRepository {
    pool: PgPool,
}

impl PgContestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContestRepository for PgContestRepository {
    async fn store(&self, contest: &mut Contest) -> AppResult<()> {
        if contest.id == 0 {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO contests (description, starts_at, ends_at, open)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&contest.description)
            .bind(contest.start)
            .bind(contest.end)
            .bind(contest.open)
            .fetch_one(&self.pool)
            .await
            .map_err(open_conflict)?;

            contest.id = id;
            return Ok(());
        }

        let result = sqlx::query(
            r#"
            UPDATE contests
            SET description = $2, starts_at = $3, ends_at = $4, open = $5
            WHERE id = $1
            "#,
        )
        .bind(contest.id)
        .bind(&contest.description)
        .bind(contest.start)
        .bind(contest.end)
        .bind(contest.open)
        .execute(&self.pool)
        .await
        .map_err(open_conflict)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Contest"));
        }

        Ok(())
    }

    async fn get_open_contests(&self) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar(r#"SELECT id FROM contests WHERE open = TRUE"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn get_running_contests(&self) -> AppResult<Vec<i64>> {
        let ids = sqlx::query_scalar(
            r#"
            SELECT id FROM contests
            WHERE open = TRUE AND NOW() BETWEEN starts_at AND ends_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn find_all(&self) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT id, description, starts_at, ends_at, open
            FROM contests
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if contests.is_empty() {
            return Err(AppError::not_found("Contest"));
        }

        Ok(contests)
    }

    async fn find_recent(&self, count: i64) -> AppResult<Vec<Contest>> {
        let contests = sqlx::query_as::<_, Contest>(
            r#"
            SELECT id, description, starts_at, ends_at, open
            FROM contests
            ORDER BY starts_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        Ok(contests)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Contest> {
        sqlx::query_as::<_, Contest>(
            r#"
            SELECT id, description, starts_at, ends_at, open
            FROM contests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Contest"))
    }
}
