//! Contest interactor

use std::sync::Arc;

use crate::{
    constants::MAX_RECENT_CONTESTS,
    db::repositories::ContestRepository,
    error::{AppError, AppResult},
    models::Contest,
    services::Validator,
};

/// Business rules for managing contests
pub struct ContestInteractor {
    contests: Arc<dyn ContestRepository>,
    validator: Arc<dyn Validator<Contest>>,
}

impl ContestInteractor {
    pub fn new(contests: Arc<dyn ContestRepository>, validator: Arc<dyn Validator<Contest>>) -> Self {
        Self { contests, validator }
    }

    /// Create a contest. Only one contest may be open at a time.
    pub async fn create_contest(&self, mut contest: Contest) -> AppResult<Contest> {
        if contest.id != 0 {
            return Err(AppError::ContestHasId(contest.id));
        }

        self.validator.validate(&contest)?;

        if contest.open && !self.contests.get_open_contests().await?.is_empty() {
            return Err(AppError::OpenContestAlreadyExists);
        }

        // The store re-checks atomically; a concurrent creator may have won
        self.contests.store(&mut contest).await?;
        tracing::info!(contest_id = contest.id, open = contest.open, "Contest created");

        Ok(contest)
    }

    pub async fn update_contest(&self, mut contest: Contest) -> AppResult<Contest> {
        if contest.id == 0 {
            return Err(AppError::ContestIdMissing);
        }

        self.validator.validate(&contest)?;

        if contest.open {
            let open = self.contests.get_open_contests().await?;
            if open.iter().any(|id| *id != contest.id) {
                return Err(AppError::OpenContestAlreadyExists);
            }
        }

        self.contests.store(&mut contest).await?;
        tracing::info!(contest_id = contest.id, open = contest.open, "Contest updated");

        Ok(contest)
    }

    pub async fn find(&self, id: i64) -> AppResult<Contest> {
        self.contests.find_by_id(id).await
    }

    pub async fn all(&self) -> AppResult<Vec<Contest>> {
        self.contests.find_all().await
    }

    /// Most recent contests, at most `MAX_RECENT_CONTESTS`
    pub async fn recent(&self, count: i64) -> AppResult<Vec<Contest>> {
        self.contests
            .find_recent(count.clamp(1, MAX_RECENT_CONTESTS))
            .await
    }
}
