//! HTTP middleware

pub mod auth;
pub mod error_report;

pub use auth::{CurrentUser, authorize, session_middleware, with_min_role};
pub use error_report::error_report_middleware;
