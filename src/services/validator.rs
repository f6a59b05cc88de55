//! Pluggable entity validation

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Contest, ContestLog},
};

/// Field-level validation of an entity before it is stored
#[cfg_attr(test, mockall::automock)]
pub trait Validator<T: Send + Sync + 'static>: Send + Sync {
    fn validate(&self, value: &T) -> AppResult<()>;
}

/// Validates contests: derived field rules plus `start <= end`
#[derive(Debug, Default, Clone, Copy)]
pub struct ContestValidator;

impl Validator<Contest> for ContestValidator {
    fn validate(&self, contest: &Contest) -> AppResult<()> {
        Validate::validate(contest)?;

        if contest.start > contest.end {
            return Err(AppError::Validation(
                "Contest end must not be before its start".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validates contest logs through their derived field rules
#[derive(Debug, Default, Clone, Copy)]
pub struct ContestLogValidator;

impl Validator<ContestLog> for ContestLogValidator {
    fn validate(&self, log: &ContestLog) -> AppResult<()> {
        Validate::validate(log)?;

        if !log.amount.is_finite() {
            return Err(AppError::Validation("Amount must be a finite number".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn contest(description: &str, start_day: u32, end_day: u32) -> Contest {
        Contest {
            id: 0,
            description: description.to_string(),
            start: Utc.with_ymd_and_hms(2019, 1, start_day, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2019, 1, end_day, 0, 0, 0).unwrap(),
            open: true,
        }
    }

    #[test]
    fn test_valid_contest() {
        assert!(ContestValidator.validate(&contest("Round 2019-01", 1, 31)).is_ok());
        assert!(ContestValidator.validate(&contest("Single day", 1, 1)).is_ok());
    }

    #[test]
    fn test_end_before_start_is_invalid() {
        let err = ContestValidator.validate(&contest("Round 2019-01", 31, 1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_description_is_required() {
        assert!(ContestValidator.validate(&contest("", 1, 31)).is_err());
    }

    #[test]
    fn test_mock_validator_is_shareable() {
        let mut validator = MockValidator::<Contest>::new();
        validator
            .expect_validate()
            .times(1)
            .returning(|_| Err(AppError::Validation("rejected".to_string())));

        let shared: Arc<dyn Validator<Contest>> = Arc::new(validator);
        let handle = std::thread::spawn(move || shared.validate(&contest("Round 2019-01", 1, 31)));

        assert!(matches!(handle.join().unwrap(), Err(AppError::Validation(_))));
    }
}
