//! Health check handlers

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::container::Container;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
async fn ping() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "pong".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health routes
pub fn routes() -> Router<Container> {
    Router::new().route("/ping", get(ping))
}
