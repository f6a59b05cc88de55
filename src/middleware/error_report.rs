//! Error reporting middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{container::Container, error::ReportableError};

/// Forward server faults recorded on the response to the error reporter
pub async fn error_report_middleware(
    State(container): State<Container>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if let Some(error) = response.extensions().get::<ReportableError>() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = %response.status().as_u16(),
            code = error.code,
            "Reporting server error"
        );
        container.error_reporter().capture(error);
    }

    response
}
