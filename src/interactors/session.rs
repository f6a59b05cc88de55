//! Session interactor: registration, login and refresh

use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::{SessionClaims, User},
    services::{PasswordHasher, TokenGenerator},
};

/// Business rules around user sessions
pub struct SessionInteractor {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenGenerator>,
    session_length: Duration,
}

impl SessionInteractor {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenGenerator>,
        session_length: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            session_length,
        }
    }

    /// Persist a new user, hashing the password unless it already is a hash
    pub async fn create_user(&self, mut user: User) -> AppResult<User> {
        if user.id != 0 {
            return Err(AppError::UserHasId(user.id));
        }

        if !user.password.is_empty() && !self.hasher.is_hashed(&user.password) {
            user.password = self.hasher.hash(&user.password)?;
        }

        self.insert(user).await
    }

    /// Persist a new user from client input; the password is always hashed
    pub async fn register(&self, mut user: User) -> AppResult<User> {
        if user.id != 0 {
            return Err(AppError::UserHasId(user.id));
        }

        user.password = self.hasher.hash(&user.password)?;

        self.insert(user).await
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        self.users.store(&mut user).await?;
        tracing::info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Check credentials and issue a token
    pub async fn create_session(&self, email: &str, password: &str) -> AppResult<(User, String)> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;

        if !self.hasher.compare(&user.password, password) {
            return Err(AppError::PasswordIncorrect);
        }

        let token = self.issue(&user)?;
        Ok((user, token))
    }

    /// Issue a fresh token from the stored state of the caller.
    ///
    /// Only the email of `user` is trusted.
    pub async fn refresh_session(&self, user: &User) -> AppResult<(User, String)> {
        let user = self
            .users
            .find_by_email(&user.email)
            .await?
            .ok_or(AppError::UserDoesNotExist)?;

        let token = self.issue(&user)?;
        Ok((user, token))
    }

    fn issue(&self, user: &User) -> AppResult<String> {
        self.tokens
            .new_token(self.session_length, &SessionClaims::new(user.clone()))
    }
}
