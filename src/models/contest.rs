//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::constants::MAX_CONTEST_DESCRIPTION_LENGTH;
use crate::utils::time::is_between;

/// Contest database model
///
/// At most one contest may be open at a time.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, Validate)]
pub struct Contest {
    pub id: i64,
    #[validate(length(min = 1, max = MAX_CONTEST_DESCRIPTION_LENGTH))]
    pub description: String,
    #[sqlx(rename = "starts_at")]
    pub start: DateTime<Utc>,
    #[sqlx(rename = "ends_at")]
    pub end: DateTime<Utc>,
    pub open: bool,
}

impl Contest {
    /// Whether the contest accepts logs at `at`
    pub fn is_running_at(&self, at: DateTime<Utc>) -> bool {
        self.open && is_between(at, self.start, self.end)
    }

    /// Get current status of the contest
    pub fn status(&self) -> ContestStatus {
        let now = Utc::now();
        if now < self.start {
            ContestStatus::Upcoming
        } else if now <= self.end {
            ContestStatus::Ongoing
        } else {
            ContestStatus::Ended
        }
    }
}

/// Contest status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Ended,
}
