//! Session middleware and role gate

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use tracing::debug;

use crate::{
    constants::BEARER_PREFIX,
    container::Container,
    error::AppError,
    models::{Role, SessionClaims, User},
};

/// The signed-in user, taken from verified session claims
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .map(|claims| CurrentUser(claims.user.clone()))
            .ok_or(AppError::Unauthorized)
    }
}

/// Parse `Authorization: Bearer <token>` into session claims.
///
/// A missing, malformed or expired token leaves the request anonymous;
/// the role gate decides whether that is acceptable.
pub async fn session_middleware(
    State(container): State<Container>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .map(str::trim);

    if let Some(token) = token {
        match container.token_generator().verify(token) {
            Ok(claims) => {
                debug!(user_id = claims.user.id, role = %claims.role(), "Session verified");
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                debug!(path = %request.uri().path(), error = %e, "Ignoring invalid session token");
            }
        }
    }

    next.run(request).await
}

/// Decide whether a caller may use a route.
///
/// Routes without a minimum role are public. Otherwise the caller's role,
/// `Guest` when anonymous, must be at least `min_role`.
pub fn authorize(min_role: Option<Role>, claims: Option<&SessionClaims>) -> Result<(), AppError> {
    let Some(min_role) = min_role else {
        return Ok(());
    };

    let role = claims.map(SessionClaims::role).unwrap_or_default();
    if role >= min_role {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Attach a minimum-role gate to a route
pub fn with_min_role<S>(route: MethodRouter<S>, min_role: Role) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn(move |request: Request, next: Next| async move {
        authorize(Some(min_role), request.extensions().get::<SessionClaims>())?;
        Ok::<_, AppError>(next.run(request).await)
    }))
}
