//! User interactor: account self-service

use std::sync::Arc;

use crate::{
    constants::{MAX_DISPLAY_NAME_LENGTH, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH},
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    services::PasswordHasher,
    utils::sanitize_string,
};

/// Business rules for a user managing their own account
pub struct UserInteractor {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserInteractor {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Replace the password after checking the current one
    pub async fn update_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let length = new_password.chars().count() as u64;
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
            return Err(AppError::Validation(format!(
                "Password must be between {} and {} characters",
                MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
            )));
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;

        if !self.hasher.compare(&user.password, current_password) {
            return Err(AppError::PasswordIncorrect);
        }

        let hash = self.hasher.hash(new_password)?;
        self.users.update_password(user.id, &hash).await?;
        tracing::info!(user_id = user.id, "Password updated");

        Ok(())
    }

    /// Change the display name and return the updated user
    pub async fn update_profile(&self, email: &str, display_name: &str) -> AppResult<User> {
        let display_name = sanitize_string(display_name);
        if display_name.is_empty() || display_name.chars().count() as u64 > MAX_DISPLAY_NAME_LENGTH {
            return Err(AppError::Validation(format!(
                "Display name must be between 1 and {} characters",
                MAX_DISPLAY_NAME_LENGTH
            )));
        }

        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;

        user.display_name = display_name;
        self.users.store(&mut user).await?;

        Ok(user)
    }
}
