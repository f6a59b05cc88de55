//! Session handler implementations

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    container::Container,
    error::AppResult,
    middleware::CurrentUser,
    models::{Preferences, Role, User},
    utils::{normalize_email, sanitize_string},
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::SessionResponse,
};

/// Register a new user
pub async fn register(
    State(container): State<Container>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<StatusCode> {
    payload.validate()?;

    container
        .session_interactor()
        .register(User {
            id: 0,
            email: normalize_email(&payload.email),
            display_name: sanitize_string(&payload.display_name),
            password: payload.password,
            role: Role::User,
            preferences: Preferences::default(),
        })
        .await?;

    Ok(StatusCode::CREATED)
}

/// Log in with email and password
pub async fn login(
    State(container): State<Container>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    payload.validate()?;

    let (user, token) = container
        .session_interactor()
        .create_session(&normalize_email(&payload.email), &payload.password)
        .await?;

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// Exchange a valid token for a fresh one reflecting the stored user
pub async fn refresh(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<SessionResponse>> {
    let (user, token) = container.session_interactor().refresh_session(&user).await?;

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}
