//! Contest log request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_LOG_DESCRIPTION_LENGTH,
    models::{LanguageCode, MediumId},
};

/// Submit a new log
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLogRequest {
    #[validate(range(min = 1))]
    pub contest_id: i64,

    pub language_code: LanguageCode,

    pub medium_id: MediumId,

    #[validate(range(min = 0.0))]
    pub amount: f32,

    #[serde(default)]
    #[validate(length(max = MAX_LOG_DESCRIPTION_LENGTH))]
    pub description: String,
}

/// Change an existing log; its contest cannot change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLogRequest {
    pub language_code: LanguageCode,

    pub medium_id: MediumId,

    #[validate(range(min = 0.0))]
    pub amount: f32,

    #[serde(default)]
    #[validate(length(max = MAX_LOG_DESCRIPTION_LENGTH))]
    pub description: String,
}

/// Query parameters for listing logs
#[derive(Debug, Deserialize)]
pub struct ListLogsQuery {
    pub contest_id: i64,
    pub user_id: i64,
}
