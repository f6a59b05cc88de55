//! Contest request DTOs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_CONTEST_DESCRIPTION_LENGTH;

/// Create or update contest request
#[derive(Debug, Deserialize, Validate)]
pub struct ContestRequest {
    #[validate(length(min = 1, max = MAX_CONTEST_DESCRIPTION_LENGTH))]
    pub description: String,

    pub start: DateTime<Utc>,

    pub end: DateTime<Utc>,

    #[serde(default)]
    pub open: bool,
}

/// Query parameters for listing contests
#[derive(Debug, Deserialize)]
pub struct ListContestsQuery {
    /// Only return the most recent contests
    pub limit: Option<i64>,
}
