//! Tadoku - Application Entry Point
//!
//! This is the main entry point for the Tadoku API server.

use std::net::SocketAddr;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tadoku::{Config, Container, db, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_new(&config.server.rust_log)
        .unwrap_or_else(|_| EnvFilter::new(tadoku::constants::DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    if config.server.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Tadoku API server...");

    let cors = cors_layer(&config.cors.allowed_origins)?;
    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid APP_HOST")?,
        config.server.port,
    );

    let container = Container::new(config)?;

    if let Some(pool) = container.pool() {
        tracing::info!("Connecting to database...");
        db::test_connection(pool)
            .await
            .context("Database is unreachable")?;

        tracing::info!("Running database migrations...");
        db::run_migrations(pool).await?;
    }

    // Build the router
    let app = handlers::app(container)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid CORS_ALLOWED_ORIGINS")?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
