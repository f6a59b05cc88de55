//! Session claims

use serde::{Deserialize, Serialize};

use super::{Role, User};

/// Facts about the caller carried inside a signed session token.
///
/// Nothing here is persisted: the token is the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user: User,
}

impl SessionClaims {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}
