//! Ranking interactor: contest sign-up, study logs and leaderboards

use std::sync::Arc;

use crate::{
    db::repositories::{ContestLogRepository, ContestRepository, RankingRepository},
    error::{AppError, AppResult},
    models::{ContestLog, LanguageCode, Ranking, RankingRegistration, User},
    services::Validator,
};

/// Business rules for rankings and the logs that feed them
pub struct RankingInteractor {
    contests: Arc<dyn ContestRepository>,
    contest_logs: Arc<dyn ContestLogRepository>,
    rankings: Arc<dyn RankingRepository>,
    log_validator: Arc<dyn Validator<ContestLog>>,
}

impl RankingInteractor {
    pub fn new(
        contests: Arc<dyn ContestRepository>,
        contest_logs: Arc<dyn ContestLogRepository>,
        rankings: Arc<dyn RankingRepository>,
        log_validator: Arc<dyn Validator<ContestLog>>,
    ) -> Self {
        Self {
            contests,
            contest_logs,
            rankings,
            log_validator,
        }
    }

    /// Sign a user up for languages in an open contest.
    ///
    /// The global ranking is always included. Languages the user already
    /// holds a ranking for are left untouched.
    pub async fn create_ranking(
        &self,
        contest_id: i64,
        user: &User,
        languages: &[LanguageCode],
    ) -> AppResult<()> {
        if languages.is_empty() {
            return Err(AppError::Validation(
                "At least one language is required".to_string(),
            ));
        }

        let contest = self.contests.find_by_id(contest_id).await?;
        if !contest.open {
            return Err(AppError::ContestIsClosed);
        }

        let existing = self
            .rankings
            .get_all_languages_for_contest_and_user(contest_id, user.id)
            .await?;

        let mut wanted = vec![LanguageCode::Global];
        wanted.extend_from_slice(languages);
        wanted.sort();
        wanted.dedup();

        for language in wanted.into_iter().filter(|l| !existing.contains(l)) {
            let mut ranking = Ranking::new(contest_id, user.id, language);
            self.rankings.create(&mut ranking).await?;
        }

        tracing::info!(contest_id, user_id = user.id, "User signed up for contest");

        self.update_ranking(contest_id, user.id).await
    }

    pub async fn create_log(&self, mut log: ContestLog) -> AppResult<ContestLog> {
        if log.id != 0 {
            return Err(AppError::ContestLogHasId(log.id));
        }

        self.log_validator.validate(&log)?;
        self.ensure_running(log.contest_id).await?;
        self.ensure_signed_up(&log).await?;

        self.contest_logs.store(&mut log).await?;
        self.update_ranking(log.contest_id, log.user_id).await?;

        Ok(log)
    }

    /// Update a log owned by `user_id`; its contest and owner cannot change
    pub async fn update_log(&self, mut log: ContestLog, user_id: i64) -> AppResult<ContestLog> {
        if log.id == 0 {
            return Err(AppError::ContestLogIdMissing);
        }

        let existing = self.owned_log(log.id, user_id).await?;
        log.contest_id = existing.contest_id;
        log.user_id = existing.user_id;

        self.log_validator.validate(&log)?;
        self.ensure_running(log.contest_id).await?;
        self.ensure_signed_up(&log).await?;

        self.contest_logs.store(&mut log).await?;
        self.update_ranking(log.contest_id, log.user_id).await?;

        Ok(log)
    }

    pub async fn delete_log(&self, id: i64, user_id: i64) -> AppResult<()> {
        let log = self.owned_log(id, user_id).await?;
        self.ensure_running(log.contest_id).await?;

        self.contest_logs.delete(id).await?;
        self.update_ranking(log.contest_id, log.user_id).await
    }

    /// Recompute every ranking of a user in a contest from their logs
    pub async fn update_ranking(&self, contest_id: i64, user_id: i64) -> AppResult<()> {
        self.rankings.recompute(contest_id, user_id).await
    }

    /// Leaderboard of a contest, global unless a language is given
    pub async fn rankings_for_contest(
        &self,
        contest_id: i64,
        language: Option<LanguageCode>,
    ) -> AppResult<Vec<Ranking>> {
        self.rankings
            .rankings_for_contest(contest_id, language.unwrap_or(LanguageCode::Global))
            .await
    }

    /// The caller's sign-up for the currently open contest
    pub async fn current_registration(&self, user_id: i64) -> AppResult<RankingRegistration> {
        let contest_id = self
            .contests
            .get_open_contests()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("Open contest"))?;
        let contest = self.contests.find_by_id(contest_id).await?;

        let languages = self
            .rankings
            .get_all_languages_for_contest_and_user(contest.id, user_id)
            .await?;

        Ok(RankingRegistration {
            contest_id: contest.id,
            start: contest.start,
            end: contest.end,
            languages,
        })
    }

    pub async fn rankings_for_registration(
        &self,
        contest_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<Ranking>> {
        let rankings = self.rankings.find_all(contest_id, user_id).await?;
        if rankings.is_empty() {
            return Err(AppError::not_found("Ranking"));
        }

        Ok(rankings)
    }

    pub async fn contest_logs(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<ContestLog>> {
        self.contest_logs.find_all(contest_id, user_id).await
    }

    async fn ensure_running(&self, contest_id: i64) -> AppResult<()> {
        let running = self.contests.get_running_contests().await?;
        if !running.contains(&contest_id) {
            return Err(AppError::ContestIsClosed);
        }

        Ok(())
    }

    async fn ensure_signed_up(&self, log: &ContestLog) -> AppResult<()> {
        let languages = self
            .rankings
            .get_all_languages_for_contest_and_user(log.contest_id, log.user_id)
            .await?;

        if !languages.contains(&log.language_code) {
            return Err(AppError::LanguageNotSignedUp);
        }

        Ok(())
    }

    async fn owned_log(&self, id: i64, user_id: i64) -> AppResult<ContestLog> {
        let log = self.contest_logs.find_by_id(id).await?;
        if log.user_id != user_id {
            return Err(AppError::Forbidden(
                "Contest log belongs to another user".to_string(),
            ));
        }

        Ok(log)
    }
}
