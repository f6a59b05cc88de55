//! Contest handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{container::Container, middleware::with_min_role, models::Role};

/// Contest routes
pub fn routes() -> Router<Container> {
    Router::new()
        .route(
            "/",
            get(handler::list_contests)
                .merge(with_min_role(post(handler::create_contest), Role::Admin)),
        )
        .route(
            "/{id}",
            get(handler::get_contest)
                .merge(with_min_role(put(handler::update_contest), Role::Admin)),
        )
}
