//! Ranking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ContestLog, LanguageCode};

/// Aggregated score of one user in one language of a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub id: i64,
    pub contest_id: i64,
    pub user_id: i64,
    /// Joined from the users table on read
    pub user_display_name: String,
    pub language_code: LanguageCode,
    pub amount: f32,
}

impl Ranking {
    /// A fresh, unscored ranking
    pub fn new(contest_id: i64, user_id: i64, language_code: LanguageCode) -> Self {
        Self {
            id: 0,
            contest_id,
            user_id,
            user_display_name: String::new(),
            language_code,
            amount: 0.0,
        }
    }

    /// Sum of the adjusted amounts of the logs counting towards this ranking.
    ///
    /// The global ranking counts every log.
    pub fn total_of(&self, logs: &[ContestLog]) -> f32 {
        logs.iter()
            .filter(|log| {
                self.language_code == LanguageCode::Global
                    || log.language_code == self.language_code
            })
            .map(ContestLog::adjusted_amount)
            .sum()
    }
}

/// The languages a user signed up for in a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRegistration {
    pub contest_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub languages: Vec<LanguageCode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediumId;

    fn log(language: LanguageCode, medium: MediumId, amount: f32) -> ContestLog {
        ContestLog {
            id: 0,
            contest_id: 1,
            user_id: 1,
            language_code: language,
            medium_id: medium,
            amount,
            description: String::new(),
        }
    }

    #[test]
    fn test_total_of() {
        let logs = [
            log(LanguageCode::Japanese, MediumId::Book, 3.0),
            log(LanguageCode::Korean, MediumId::Net, 4.0),
            log(LanguageCode::Japanese, MediumId::Comic, 10.0),
        ];

        let japanese = Ranking::new(1, 1, LanguageCode::Japanese);
        let global = Ranking::new(1, 1, LanguageCode::Global);
        let german = Ranking::new(1, 1, LanguageCode::German);

        assert!((japanese.total_of(&logs) - 5.0).abs() < 1e-4);
        assert!((global.total_of(&logs) - 9.0).abs() < 1e-4);
        assert_eq!(german.total_of(&logs), 0.0);
    }
}
