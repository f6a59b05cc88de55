//! Contest log response DTOs

use serde::Serialize;

use crate::models::{ContestLog, LanguageCode, MediumId};

/// Contest log response
#[derive(Debug, Serialize)]
pub struct ContestLogResponse {
    pub id: i64,
    pub contest_id: i64,
    pub user_id: i64,
    pub language_code: LanguageCode,
    pub medium_id: MediumId,
    pub amount: f32,
    /// Amount after the medium multiplier
    pub adjusted_amount: f32,
    pub description: String,
}

impl From<ContestLog> for ContestLogResponse {
    fn from(log: ContestLog) -> Self {
        let adjusted_amount = log.adjusted_amount();
        Self {
            id: log.id,
            contest_id: log.contest_id,
            user_id: log.user_id,
            language_code: log.language_code,
            medium_id: log.medium_id,
            amount: log.amount,
            adjusted_amount,
            description: log.description,
        }
    }
}
