//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Authorization header scheme prefix
pub const BEARER_PREFIX: &str = "Bearer ";

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum display name length
pub const MAX_DISPLAY_NAME_LENGTH: u64 = 64;

// =============================================================================
// CONTEST LIMITS
// =============================================================================

/// Maximum contest description length
pub const MAX_CONTEST_DESCRIPTION_LENGTH: u64 = 256;

/// Maximum contest log description length
pub const MAX_LOG_DESCRIPTION_LENGTH: u64 = 512;

/// Default number of contests returned by `GET /contests?limit=`
pub const MAX_RECENT_CONTESTS: i64 = 100;

// =============================================================================
// ERROR REPORTING
// =============================================================================

/// Timeout for a single error report delivery
pub const ERROR_REPORT_TIMEOUT_SECS: u64 = 5;
