//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.
//!
//! Errors fall into two classes. *Ignorable* errors are expected,
//! client-attributable failures (wrong credentials, missing resources,
//! rule violations): they map to 4xx and are logged at debug level.
//! Everything else is a server fault: it maps to 5xx without leaking
//! detail and is handed to the error reporter.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Session errors
    #[error("user does not exist")]
    UserDoesNotExist,

    #[error("invalid password supplied")]
    PasswordIncorrect,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User with an ID ({0}) could not be created")]
    UserHasId(i64),

    #[error("Contest with an ID ({0}) could not be created")]
    ContestHasId(i64),

    #[error("Contest log with an ID ({0}) could not be created")]
    ContestLogHasId(i64),

    #[error("contest id is missing")]
    ContestIdMissing,

    #[error("contest log id is missing")]
    ContestLogIdMissing,

    #[error("user is not signed up for this language in the contest")]
    LanguageNotSignedUp,

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("there can only be one open contest at a time")]
    OpenContestAlreadyExists,

    #[error("contest is not running")]
    ContestIsClosed,

    // Server faults
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Server fault carried on a response so the reporting middleware can
/// forward it without the handler knowing about the reporter.
#[derive(Debug, Clone)]
pub struct ReportableError {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserDoesNotExist => "USER_DOES_NOT_EXIST",
            Self::PasswordIncorrect => "PASSWORD_INCORRECT",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserHasId(_) | Self::ContestHasId(_) | Self::ContestLogHasId(_) => {
                "CREATE_WITH_ID"
            }
            Self::ContestIdMissing => "CONTEST_ID_MISSING",
            Self::ContestLogIdMissing => "CONTEST_LOG_ID_MISSING",
            Self::LanguageNotSignedUp => "LANGUAGE_NOT_SIGNED_UP",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::OpenContestAlreadyExists => "OPEN_CONTEST_ALREADY_EXISTS",
            Self::ContestIsClosed => "CONTEST_IS_CLOSED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UserDoesNotExist
            | Self::PasswordIncorrect
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_)
            | Self::UserHasId(_)
            | Self::ContestHasId(_)
            | Self::ContestLogHasId(_)
            | Self::ContestIdMissing
            | Self::ContestLogIdMissing
            | Self::LanguageNotSignedUp => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::OpenContestAlreadyExists | Self::ContestIsClosed => {
                StatusCode::CONFLICT
            }
            Self::Database(_) | Self::Internal(_) | Self::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Expected, client-attributable failures that must not raise alerts
    pub fn is_ignorable(&self) -> bool {
        !matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Configuration(_)
        )
    }

    /// Shorthand for a not-found error on an entity
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_ignorable() {
            tracing::debug!(code, error = %self, "Request rejected");
        } else {
            tracing::error!(code, error = ?self, "Request failed");
        }

        // Don't expose server fault details to clients
        let message = match &self {
            AppError::Internal(_) => "An internal error occurred".to_string(),
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::Configuration(_) => "The server is misconfigured".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if !self.is_ignorable() {
            response.extensions_mut().insert(ReportableError {
                code,
                message: format!("{:#}", ErrorChain(&self)),
            });
        }
        response
    }
}

/// Formats an error with its full source chain
struct ErrorChain<'a>(&'a AppError);

impl std::fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            AppError::Internal(inner) => write!(f, "{:#}", inner),
            other => write!(f, "{}", other),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violations
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
