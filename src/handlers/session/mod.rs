//! Session handlers: register, login and refresh

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::post};

use crate::{container::Container, middleware::with_min_role, models::Role};

/// Session routes
pub fn routes() -> Router<Container> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/register", post(handler::register))
        .route("/refresh", with_min_role(post(handler::refresh), Role::User))
}
