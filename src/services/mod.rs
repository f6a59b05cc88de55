//! Stateless services shared by the interactors

pub mod error_reporter;
pub mod password;
pub mod token;
pub mod validator;

pub use error_reporter::{ErrorReporter, HttpReporter, TracingReporter};
pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{JwtGenerator, TokenGenerator};
pub use validator::{ContestLogValidator, ContestValidator, Validator};
