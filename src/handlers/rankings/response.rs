//! Ranking response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{LanguageCode, Ranking, RankingRegistration};

/// Ranking response
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub id: i64,
    pub contest_id: i64,
    pub user_id: i64,
    pub user_display_name: String,
    pub language_code: LanguageCode,
    pub amount: f32,
}

impl From<Ranking> for RankingResponse {
    fn from(ranking: Ranking) -> Self {
        Self {
            id: ranking.id,
            contest_id: ranking.contest_id,
            user_id: ranking.user_id,
            user_display_name: ranking.user_display_name,
            language_code: ranking.language_code,
            amount: ranking.amount,
        }
    }
}

/// Registration for the open contest
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub contest_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub languages: Vec<LanguageCode>,
}

impl From<RankingRegistration> for RegistrationResponse {
    fn from(registration: RankingRegistration) -> Self {
        Self {
            contest_id: registration.contest_id,
            start: registration.start,
            end: registration.end,
            languages: registration.languages,
        }
    }
}
