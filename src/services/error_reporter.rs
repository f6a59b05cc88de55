//! Forwarding of server faults to an external error tracker

use std::time::Duration;

use reqwest::Url;
use serde::Serialize;

use crate::{
    constants::ERROR_REPORT_TIMEOUT_SECS,
    error::{AppError, AppResult, ReportableError},
};

/// Sink for non-ignorable errors
#[cfg_attr(test, mockall::automock)]
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, error: &ReportableError);
}

/// Reporter that only logs; used when no DSN is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn capture(&self, error: &ReportableError) {
        tracing::error!(code = error.code, message = %error.message, "Unhandled server error");
    }
}

#[derive(Debug, Serialize)]
struct ErrorReport<'a> {
    code: &'a str,
    message: &'a str,
    service: &'static str,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// Reporter that POSTs each error as JSON to a webhook endpoint.
///
/// Delivery happens on a spawned task so request latency never depends on
/// the tracker being reachable.
#[derive(Clone)]
pub struct HttpReporter {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpReporter {
    /// Parse and check an `ERROR_REPORTER_DSN`
    pub fn parse_dsn(dsn: &str) -> AppResult<Url> {
        let endpoint = Url::parse(dsn)
            .map_err(|e| AppError::Configuration(format!("Invalid ERROR_REPORTER_DSN: {}", e)))?;

        match endpoint.scheme() {
            "http" | "https" => Ok(endpoint),
            other => Err(AppError::Configuration(format!(
                "Unsupported ERROR_REPORTER_DSN scheme: {}",
                other
            ))),
        }
    }

    pub fn new(endpoint: Url) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(ERROR_REPORT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default error reporter client");
                reqwest::Client::new()
            });

        Self { client, endpoint }
    }
}

impl ErrorReporter for HttpReporter {
    fn capture(&self, error: &ReportableError) {
        let report = ErrorReport {
            code: error.code,
            message: &error.message,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now(),
        };
        let body = match serde_json::to_value(&report) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode error report");
                return;
            }
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(code = error.code, "No runtime available to deliver error report");
            return;
        };

        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        runtime.spawn(async move {
            match client.post(endpoint).json(&body).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(status = %response.status(), "Error tracker rejected report");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Failed to deliver error report"),
            }
        });
    }
}
