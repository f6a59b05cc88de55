//! Contest response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Contest, ContestStatus};

/// Contest response
#[derive(Debug, Serialize)]
pub struct ContestResponse {
    pub id: i64,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub open: bool,
    pub status: ContestStatus,
}

impl From<Contest> for ContestResponse {
    fn from(contest: Contest) -> Self {
        let status = contest.status();
        Self {
            id: contest.id,
            description: contest.description,
            start: contest.start,
            end: contest.end,
            open: contest.open,
            status,
        }
    }
}
