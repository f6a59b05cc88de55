//! Session response DTOs

use serde::Serialize;

use crate::models::{Preferences, Role, User};

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub preferences: Preferences,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            preferences: user.preferences,
        }
    }
}

/// Token plus the user it was issued for
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}
