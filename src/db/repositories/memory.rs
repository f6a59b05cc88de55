//! In-memory repositories
//!
//! Used by tests and local runs without Postgres. All four repositories
//! share one [`MemoryStore`] so rankings can join user display names the
//! way the SQL variant does. Each operation holds the store lock for its
//! whole duration, which also makes the single-open-contest check atomic.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{ContestLogRepository, ContestRepository, RankingRepository, UserRepository};
use crate::{
    error::{AppError, AppResult},
    models::{Contest, ContestLog, LanguageCode, Ranking, User},
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    contests: Vec<Contest>,
    contest_logs: Vec<ContestLog>,
    rankings: Vec<Ranking>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn display_name(&self, user_id: i64) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.display_name.clone())
            .unwrap_or_default()
    }
}

/// Shared backing store for the in-memory repositories
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &mut User) -> AppResult<()> {
        let mut tables = self.store.tables.lock().await;

        if tables.users.iter().any(|u| u.email == user.email && u.id != user.id) {
            return Err(AppError::AlreadyExists(
                "A user with this email already exists".to_string(),
            ));
        }

        if user.id == 0 {
            user.id = tables.next_id();
            tables.users.push(user.clone());
            return Ok(());
        }

        let existing = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("User"))?;
        // Password changes only go through update_password
        let password = std::mem::take(&mut existing.password);
        *existing = User {
            password,
            ..user.clone()
        };

        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut tables = self.store.tables.lock().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User"))?;
        user.password = password_hash.to_string();

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.store.tables.lock().await;

        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        let tables = self.store.tables.lock().await;

        tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("User"))
    }
}

/// In-memory contest repository
#[derive(Clone)]
pub struct InMemoryContestRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryContestRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContestRepository for InMemoryContestRepository {
    async fn store(&self, contest: &mut Contest) -> AppResult<()> {
        let mut tables = self.store.tables.lock().await;

        if contest.open && tables.contests.iter().any(|c| c.open && c.id != contest.id) {
            return Err(AppError::OpenContestAlreadyExists);
        }

        if contest.id == 0 {
            contest.id = tables.next_id();
            tables.contests.push(contest.clone());
            return Ok(());
        }

        let existing = tables
            .contests
            .iter_mut()
            .find(|c| c.id == contest.id)
            .ok_or_else(|| AppError::not_found("Contest"))?;
        *existing = contest.clone();

        Ok(())
    }

    async fn get_open_contests(&self) -> AppResult<Vec<i64>> {
        let tables = self.store.tables.lock().await;

        Ok(tables.contests.iter().filter(|c| c.open).map(|c| c.id).collect())
    }

    async fn get_running_contests(&self) -> AppResult<Vec<i64>> {
        let tables = self.store.tables.lock().await;
        let now = Utc::now();

        Ok(tables
            .contests
            .iter()
            .filter(|c| c.is_running_at(now))
            .map(|c| c.id)
            .collect())
    }

    async fn find_all(&self) -> AppResult<Vec<Contest>> {
        let tables = self.store.tables.lock().await;

        if tables.contests.is_empty() {
            return Err(AppError::not_found("Contest"));
        }

        Ok(tables.contests.iter().rev().cloned().collect())
    }

    async fn find_recent(&self, count: i64) -> AppResult<Vec<Contest>> {
        let tables = self.store.tables.lock().await;

        let mut contests = tables.contests.clone();
        contests.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
        contests.truncate(usize::try_from(count).unwrap_or(0));

        Ok(contests)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Contest> {
        let tables = self.store.tables.lock().await;

        tables
            .contests
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Contest"))
    }
}

/// In-memory contest log repository
#[derive(Clone)]
pub struct InMemoryContestLogRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryContestLogRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ContestLogRepository for InMemoryContestLogRepository {
    async fn store(&self, log: &mut ContestLog) -> AppResult<()> {
        let mut tables = self.store.tables.lock().await;

        if log.id == 0 {
            log.id = tables.next_id();
            tables.contest_logs.push(log.clone());
            return Ok(());
        }

        let existing = tables
            .contest_logs
            .iter_mut()
            .find(|l| l.id == log.id)
            .ok_or_else(|| AppError::not_found("Contest log"))?;
        *existing = log.clone();

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<ContestLog> {
        let tables = self.store.tables.lock().await;

        tables
            .contest_logs
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Contest log"))
    }

    async fn find_all(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<ContestLog>> {
        let tables = self.store.tables.lock().await;

        Ok(tables
            .contest_logs
            .iter()
            .filter(|l| l.contest_id == contest_id && l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tables = self.store.tables.lock().await;

        let before = tables.contest_logs.len();
        tables.contest_logs.retain(|l| l.id != id);
        if tables.contest_logs.len() == before {
            return Err(AppError::not_found("Contest log"));
        }

        Ok(())
    }
}

/// In-memory ranking repository
#[derive(Clone)]
pub struct InMemoryRankingRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryRankingRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RankingRepository for InMemoryRankingRepository {
    async fn create(&self, ranking: &mut Ranking) -> AppResult<()> {
        if ranking.id != 0 {
            return Err(AppError::Validation(format!(
                "Ranking with an ID ({}) could not be created",
                ranking.id
            )));
        }

        let mut tables = self.store.tables.lock().await;

        let duplicate = tables.rankings.iter().any(|r| {
            r.contest_id == ranking.contest_id
                && r.user_id == ranking.user_id
                && r.language_code == ranking.language_code
        });
        if duplicate {
            return Err(AppError::AlreadyExists("Ranking already exists".to_string()));
        }

        ranking.id = tables.next_id();
        tables.rankings.push(ranking.clone());

        Ok(())
    }

    async fn recompute(&self, contest_id: i64, user_id: i64) -> AppResult<()> {
        let mut tables = self.store.tables.lock().await;

        let logs: Vec<ContestLog> = tables
            .contest_logs
            .iter()
            .filter(|l| l.contest_id == contest_id && l.user_id == user_id)
            .cloned()
            .collect();

        for ranking in tables
            .rankings
            .iter_mut()
            .filter(|r| r.contest_id == contest_id && r.user_id == user_id)
        {
            ranking.amount = ranking.total_of(&logs);
        }

        Ok(())
    }

    async fn rankings_for_contest(
        &self,
        contest_id: i64,
        language: LanguageCode,
    ) -> AppResult<Vec<Ranking>> {
        let tables = self.store.tables.lock().await;

        let mut rankings: Vec<Ranking> = tables
            .rankings
            .iter()
            .filter(|r| r.contest_id == contest_id && r.language_code == language)
            .map(|r| Ranking {
                user_display_name: tables.display_name(r.user_id),
                ..r.clone()
            })
            .collect();
        rankings.sort_by(|a, b| b.amount.total_cmp(&a.amount).then(a.id.cmp(&b.id)));

        Ok(rankings)
    }

    async fn find_all(&self, contest_id: i64, user_id: i64) -> AppResult<Vec<Ranking>> {
        let tables = self.store.tables.lock().await;

        Ok(tables
            .rankings
            .iter()
            .filter(|r| r.contest_id == contest_id && r.user_id == user_id)
            .map(|r| Ranking {
                user_display_name: tables.display_name(r.user_id),
                ..r.clone()
            })
            .collect())
    }

    async fn get_all_languages_for_contest_and_user(
        &self,
        contest_id: i64,
        user_id: i64,
    ) -> AppResult<Vec<LanguageCode>> {
        let tables = self.store.tables.lock().await;

        Ok(tables
            .rankings
            .iter()
            .filter(|r| r.contest_id == contest_id && r.user_id == user_id)
            .map(|r| r.language_code)
            .collect())
    }
}
