//! Contest log handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{post, put},
};

use crate::{container::Container, middleware::with_min_role, models::Role};

/// Contest log routes, all of which need a signed-in user
pub fn routes() -> Router<Container> {
    Router::new()
        .route(
            "/",
            with_min_role(
                post(handler::create_log).get(handler::list_logs),
                Role::User,
            ),
        )
        .route(
            "/{id}",
            with_min_role(
                put(handler::update_log).delete(handler::delete_log),
                Role::User,
            ),
        )
}
