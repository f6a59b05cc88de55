//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod contest_logs;
pub mod contests;
pub mod health;
pub mod rankings;
pub mod session;
pub mod users;

use axum::{Router, middleware};

use crate::{
    container::Container,
    middleware::{error_report_middleware, session_middleware},
};

/// Create all API routes
pub fn routes() -> Router<Container> {
    Router::new()
        .merge(health::routes())
        .merge(session::routes())
        .nest("/users", users::routes())
        .nest("/contests", contests::routes())
        .nest("/rankings", rankings::routes())
        .nest("/contest_logs", contest_logs::routes())
}

/// The complete application: routes, session parsing and error reporting
pub fn app(container: Container) -> Router {
    routes()
        .layer(middleware::from_fn_with_state(
            container.clone(),
            session_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            container.clone(),
            error_report_middleware,
        ))
        .with_state(container)
}
