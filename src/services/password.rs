//! Password hashing service

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AppError, AppResult};

/// One-way password hashing with constant-time comparison
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt
    fn hash(&self, plaintext: &str) -> AppResult<String>;

    /// Check a plaintext password against a stored hash
    fn compare(&self, hashed: &str, plaintext: &str) -> bool;

    /// Whether `value` is a complete hash this hasher produced
    fn is_hashed(&self, value: &str) -> bool;
}

/// Argon2id hasher producing PHC strings
#[derive(Default, Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    fn compare(&self, hashed: &str, plaintext: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hashed) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn is_hashed(&self, value: &str) -> bool {
        PasswordHash::new(value).is_ok_and(|hash| {
            argon2::Algorithm::try_from(hash.algorithm).is_ok() && hash.hash.is_some()
        })
    }
}
