//! Ranking request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::models::LanguageCode;

/// Sign up for a contest in one or more languages
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRankingRequest {
    #[validate(range(min = 1))]
    pub contest_id: i64,

    #[validate(length(min = 1))]
    pub languages: Vec<LanguageCode>,
}

/// Query parameters for a contest leaderboard
#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    pub contest_id: i64,
    pub language_code: Option<LanguageCode>,
}

/// Query parameters for one user's rankings in a contest
#[derive(Debug, Deserialize)]
pub struct RegistrationQuery {
    pub contest_id: i64,
    pub user_id: i64,
}
