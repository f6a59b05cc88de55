//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_SERVER_HOST};
use crate::utils::time::parse_duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub error_reporter: ErrorReporterConfig,
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub json_logs: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept open while idle
    pub max_idle_connections: u32,
    pub max_open_connections: u32,
}

/// Session token configuration
#[derive(Clone)]
pub struct SessionConfig {
    pub jwt_secret: String,
    pub session_length: Duration,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("jwt_secret", &"<redacted>")
            .field("session_length", &self.session_length)
            .finish()
    }
}

/// Error reporter configuration
#[derive(Debug, Clone, Default)]
pub struct ErrorReporterConfig {
    /// Endpoint receiving error reports; reports are only logged when unset
    pub dsn: Option<String>,
}

/// Cross-origin configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let config = Self {
            server: ServerConfig {
                host: vars.optional("APP_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
                port: vars.parsed("APP_PORT")?,
                rust_log: vars.optional("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                json_logs: vars.optional("LOG_FORMAT").is_some_and(|v| v == "json"),
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_idle_connections: vars.parsed("DATABASE_MAX_IDLE_CONNS")?,
                max_open_connections: vars.parsed("DATABASE_MAX_OPEN_CONNS")?,
            },
            session: SessionConfig {
                jwt_secret: vars.required("JWT_SECRET")?,
                session_length: parse_duration(&vars.required("USER_SESSION_LENGTH")?)
                    .ok_or_else(|| ConfigError::InvalidValue("USER_SESSION_LENGTH".to_string()))?,
            },
            error_reporter: ErrorReporterConfig {
                dsn: vars.optional("ERROR_REPORTER_DSN"),
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .required("CORS_ALLOWED_ORIGINS")?
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_open_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_OPEN_CONNS".to_string()));
        }
        if self.database.max_idle_connections > self.database.max_open_connections {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_IDLE_CONNS".to_string()));
        }
        if self.session.session_length.is_zero() {
            return Err(ConfigError::InvalidValue("USER_SESSION_LENGTH".to_string()));
        }
        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Missing("CORS_ALLOWED_ORIGINS".to_string()));
        }
        Ok(())
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn parsed<T: std::str::FromStr>(&self, key: &str) -> Result<T, ConfigError> {
        self.required(key)?
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string()))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
