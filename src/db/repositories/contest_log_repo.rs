//! Contest log repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::{
    error::{AppError, AppResult},
    models::{ContestLog, MediumId},
};

/// Persistence capability for contest logs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContestLogRepository: Send + Sync {
    /// Insert when `id == 0` (assigning the new id), update otherwise
    async fn store(&self, log: &mut ContestLog) -> AppResult<()>;

    async fn find_by_id(&self, id: i64) -> AppResult<ContestLog>;

    /// Logs matching both the contest and the user
    async fn find_all(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<ContestLog>>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

#[derive(Debug, FromRow)]
pub(super) struct ContestLogRow {
    id: i64,
    contest_id: i64,
    user_id: i64,
    language_code: String,
    medium_id: i32,
    amount: f32,
    description: String,
}

impl TryFrom<ContestLogRow> for ContestLog {
    type Error = AppError;

    fn try_from(row: ContestLogRow) -> Result<Self, Self::Error> {
        Ok(ContestLog {
            id: row.id,
            contest_id: row.contest_id,
            user_id: row.user_id,
            language_code: row.language_code.parse()?,
            medium_id: MediumId::try_from(row.medium_id)?,
            amount: row.amount,
            description: row.description,
        })
    }
}

/// Postgres-backed contest log repository
#[derive(Clone)]
pub struct PgContestLogRepository {
    pool: PgPool,
}

impl PgContestLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContestLogRepository for PgContestLogRepository {
    async fn store(&self, log: &mut ContestLog) -> AppResult<()> {
        if log.id == 0 {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO contest_logs (contest_id, user_id, language_code, medium_id, amount, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id
                "#,
            )
            .bind(log.contest_id)
            .bind(log.user_id)
            .bind(log.language_code.as_str())
            .bind(i32::from(log.medium_id))
            .bind(log.amount)
            .bind(&log.description)
            .fetch_one(&self.pool)
            .await?;

            log.id = id;
            return Ok(());
        }

        let result = sqlx::query(
            r#"
            UPDATE contest_logs
            SET
                contest_id = $2,
                user_id = $3,
                language_code = $4,
                medium_id = $5,
                amount = $6,
                description = $7,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(log.id)
        .bind(log.contest_id)
        .bind(log.user_id)
        .bind(log.language_code.as_str())
        .bind(i32::from(log.medium_id))
        .bind(log.amount)
        .bind(&log.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Contest log"));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<ContestLog> {
        sqlx::query_as::<_, ContestLogRow>(
            r#"
            SELECT id, contest_id, user_id, language_code, medium_id, amount, description
            FROM contest_logs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Contest log"))?
        .try_into()
    }

    async fn find_all(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<ContestLog>> {
        let rows = sqlx::query_as::<_, ContestLogRow>(
            r#"
            SELECT id, contest_id, user_id, language_code, medium_id, amount, description
            FROM contest_logs
            WHERE contest_id = $1 AND user_id = $2
            ORDER BY id
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ContestLog::try_from).collect()
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query(r#"DELETE FROM contest_logs WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Contest log"));
        }

        Ok(())
    }
}
