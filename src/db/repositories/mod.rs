//! Database repositories
//!
//! Each entity has a repository trait with a Postgres implementation and an
//! in-memory implementation. Callers only ever hold `Arc<dyn Trait>`.

pub mod contest_log_repo;
pub mod contest_repo;
pub mod memory;
pub mod ranking_repo;
pub mod user_repo;

use std::sync::Arc;

use sqlx::PgPool;

pub use contest_log_repo::{ContestLogRepository, PgContestLogRepository};
pub use contest_repo::{ContestRepository, PgContestRepository};
pub use memory::{
    InMemoryContestLogRepository, InMemoryContestRepository, InMemoryRankingRepository,
    InMemoryUserRepository, MemoryStore,
};
pub use ranking_repo::{PgRankingRepository, RankingRepository};
pub use user_repo::{PgUserRepository, UserRepository};

/// One instance of every repository, backed by the same storage
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub contests: Arc<dyn ContestRepository>,
    pub contest_logs: Arc<dyn ContestLogRepository>,
    pub rankings: Arc<dyn RankingRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            contests: Arc::new(PgContestRepository::new(pool.clone())),
            contest_logs: Arc::new(PgContestLogRepository::new(pool.clone())),
            rankings: Arc::new(PgRankingRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            contests: Arc::new(InMemoryContestRepository::new(store.clone())),
            contest_logs: Arc::new(InMemoryContestLogRepository::new(store.clone())),
            rankings: Arc::new(InMemoryRankingRepository::new(store)),
        }
    }
}
