//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod contest;
pub mod contest_log;
pub mod ranking;
pub mod session;
pub mod user;

pub use contest::*;
pub use contest_log::*;
pub use ranking::*;
pub use session::*;
pub use user::*;
