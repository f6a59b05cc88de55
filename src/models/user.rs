//! User model

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Access level of a user; ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(AppError::Validation(format!("unknown role: {}", other))),
        }
    }
}

/// Client-owned settings, stored as a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(pub serde_json::Map<String, serde_json::Value>);

/// User domain model
///
/// An `id` of 0 marks a user that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    /// Argon2 PHC string once stored; never serialized
    #[serde(skip)]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub preferences: Preferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_are_ordered_by_privilege() {
        assert!(Role::Guest < Role::User);
        assert!(Role::User < Role::Admin);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_is_never_serialized() {
        let user = User {
            id: 1,
            email: "foo@bar.com".to_string(),
            display_name: "John Doe".to_string(),
            password: "foobar".to_string(),
            role: Role::User,
            preferences: Preferences::default(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "user");
        assert!(!json.to_string().contains("foobar"));
    }
}
