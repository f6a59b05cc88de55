//! User handler implementations

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::{
    container::Container,
    error::AppResult,
    handlers::session::UserResponse,
    middleware::CurrentUser,
};

use super::request::{UpdatePasswordRequest, UpdateProfileRequest};

/// Change the caller's password
pub async fn update_password(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdatePasswordRequest>,
) -> AppResult<StatusCode> {
    payload.validate()?;

    container
        .user_interactor()
        .update_password(&user.email, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Update the caller's profile
pub async fn update_profile(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = container
        .user_interactor()
        .update_profile(&user.email, &payload.display_name)
        .await?;

    Ok(Json(user.into()))
}
