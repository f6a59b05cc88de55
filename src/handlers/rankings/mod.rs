//! Ranking handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::{container::Container, middleware::with_min_role, models::Role};

/// Ranking routes
pub fn routes() -> Router<Container> {
    Router::new()
        .route(
            "/",
            get(handler::list_rankings)
                .merge(with_min_role(post(handler::create_ranking), Role::User)),
        )
        .route(
            "/current",
            with_min_role(get(handler::current_registration), Role::User),
        )
        .route("/registration", get(handler::registration_rankings))
}
