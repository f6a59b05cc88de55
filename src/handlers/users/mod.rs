//! User self-service handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{Router, routing::post};

use crate::{container::Container, middleware::with_min_role, models::Role};

/// User routes
pub fn routes() -> Router<Container> {
    Router::new()
        .route(
            "/update_password",
            with_min_role(post(handler::update_password), Role::User),
        )
        .route("/profile", with_min_role(post(handler::update_profile), Role::User))
}
