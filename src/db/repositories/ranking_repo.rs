//! Ranking repository

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::contest_log_repo::ContestLogRow;
use crate::{
    error::{AppError, AppResult},
    models::{ContestLog, LanguageCode, Ranking},
};

/// Persistence capability for rankings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingRepository: Send + Sync {
    /// Insert a new ranking, assigning its id
    async fn create(&self, ranking: &mut Ranking) -> AppResult<()>;

    /// Recompute the amounts of a user's rankings in a contest from their
    /// logs. Reading the logs and writing the sums is atomic.
    async fn recompute(&self, contest_id: i64, user_id: i64) -> AppResult<()>;

    /// Leaderboard for one language, highest amount first
    async fn rankings_for_contest(
        &self,
        contest_id: i64,
        language: LanguageCode,
    ) -> AppResult<Vec<Ranking>>;

    /// Every ranking a user holds in a contest
    async fn find_all(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<Ranking>>;

    /// Languages a user signed up for in a contest
    async fn get_all_languages_for_contest_and_user(
        &self,
        contest_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<LanguageCode>>;
}

#[derive(Debug, FromRow)]
struct RankingRow {
    id: i64,
    contest_id: i64,
    user_id: i64,
    user_display_name: String,
    language_code: String,
    amount: f32,
}

impl TryFrom<RankingRow> for Ranking {
    type Error = AppError;

    fn try_from(row: RankingRow) -> Result<Self, Self::Error> {
        Ok(Ranking {
            id: row.id,
            contest_id: row.contest_id,
            user_id: row.user_id,
            user_display_name: row.user_display_name,
            language_code: row.language_code.parse()?,
            amount: row.amount,
        })
    }
}

/// Postgres-backed ranking repository
#[derive(Clone)]
pub struct PgRankingRepository {
    pool: PgPool,
}

impl PgRankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankingRepository for PgRankingRepository {
    async fn create(&self, ranking: &mut Ranking) -> AppResult<()> {
        if ranking.id != 0 {
            return Err(AppError::Validation(format!(
                "Ranking with an ID ({}) could not be created",
                ranking.id
            )));
        }

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO rankings (contest_id, user_id, language_code, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(ranking.contest_id)
        .bind(ranking.user_id)
        .bind(ranking.language_code.as_str())
        .bind(ranking.amount)
        .fetch_one(&self.pool)
        .await?;

        ranking.id = id;
        Ok(())
    }

    async fn recompute(&self, contest_id: i64, user_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Row locks serialise concurrent recomputes of the same user, so the
        // later one reads every committed log
        let rows: Vec<(i64, String)> = sqlx::query_as(
            r#"
            SELECT id, language_code FROM rankings
            WHERE contest_id = $1 AND user_id = $2
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        let logs = sqlx::query_as::<_, ContestLogRow>(
            r#"
            SELECT id, contest_id, user_id, language_code, medium_id, amount, description
            FROM contest_logs
            WHERE contest_id = $1 AND user_id = $2
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(ContestLog::try_from)
        .collect::<AppResult<Vec<_>>>()?;

        for (id, language_code) in rows {
            let ranking = Ranking {
                id,
                ..Ranking::new(contest_id, user_id, language_code.parse()?)
            };

            sqlx::query(
                r#"
                UPDATE rankings
                SET amount = $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(ranking.id)
            .bind(ranking.total_of(&logs))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn rankings_for_contest(
        &self,
        contest_id: i64,
        language: LanguageCode,
    ) -> AppResult<Vec<Ranking>> {
        let rows = sqlx::query_as::<_, RankingRow>(
            r#"
            SELECT
                rankings.id,
                rankings.contest_id,
                rankings.user_id,
                users.display_name AS user_display_name,
                rankings.language_code,
                rankings.amount
            FROM rankings
            INNER JOIN users ON users.id = rankings.user_id
            WHERE rankings.contest_id = $1 AND rankings.language_code = $2
            ORDER BY rankings.amount DESC, rankings.id
            "#,
        )
        .bind(contest_id)
        .bind(language.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Ranking::try_from).collect()
    }

    async fn find_all(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<Ranking>> {
        let rows = sqlx::query_as::<_, RankingRow>(
            r#"
            SELECT
                rankings.id,
                rankings.contest_id,
                rankings.user_id,
                users.display_name AS user_display_name,
                rankings.language_code,
                rankings.amount
            FROM rankings
            INNER JOIN users ON users.id = rankings.user_id
            WHERE rankings.contest_id = $1 AND rankings.user_id = $2
            ORDER BY rankings.id
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Ranking::try_from).collect()
    }

    async fn get_all_languages_for_contest_and_user(
        &self,
        contest_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<LanguageCode>> {
        let codes: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT language_code FROM rankings
            WHERE contest_id = $1 AND user_id = $2
            ORDER BY id
            "#,
        )
        .bind(contest_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        codes.iter().map(|code| code.parse()).collect()
    }
}
