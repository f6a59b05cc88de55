//! Utility functions

pub mod time;
pub mod validation;

pub use time::parse_duration;
pub use validation::{normalize_email, sanitize_string};
