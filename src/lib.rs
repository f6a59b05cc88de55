//! Tadoku - Language Learning Contest Tracker
//!
//! This library provides the backend of Tadoku, where users sign up for
//! time-bounded reading contests, log what they studied and compete in
//! per-language rankings.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Interactors**: Business rules
//! - **Services**: Password hashing, session tokens, error reporting
//! - **Repositories**: Database access, with in-memory variants
//! - **Container**: Lazily built, shared collaborators

pub mod config;
pub mod constants;
pub mod container;
pub mod db;
pub mod error;
pub mod handlers;
pub mod interactors;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use container::Container;
pub use error::{AppError, AppResult};
