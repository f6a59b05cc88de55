//! Ranking handler implementations

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{container::Container, error::AppResult, middleware::CurrentUser};

use super::{
    request::{CreateRankingRequest, RankingsQuery, RegistrationQuery},
    response::{RankingResponse, RegistrationResponse},
};

/// Leaderboard of a contest, global unless a language is given
pub async fn list_rankings(
    State(container): State<Container>,
    Query(query): Query<RankingsQuery>,
) -> AppResult<Json<Vec<RankingResponse>>> {
    let rankings = container
        .ranking_interactor()
        .rankings_for_contest(query.contest_id, query.language_code)
        .await?;

    Ok(Json(rankings.into_iter().map(Into::into).collect()))
}

/// Sign the caller up for a contest
pub async fn create_ranking(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateRankingRequest>,
) -> AppResult<StatusCode> {
    payload.validate()?;

    container
        .ranking_interactor()
        .create_ranking(payload.contest_id, &user, &payload.languages)
        .await?;

    Ok(StatusCode::CREATED)
}

/// The caller's registration for the open contest
pub async fn current_registration(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<RegistrationResponse>> {
    let registration = container
        .ranking_interactor()
        .current_registration(user.id)
        .await?;

    Ok(Json(registration.into()))
}

/// All rankings of one user in one contest
pub async fn registration_rankings(
    State(container): State<Container>,
    Query(query): Query<RegistrationQuery>,
) -> AppResult<Json<Vec<RankingResponse>>> {
    let rankings = container
        .ranking_interactor()
        .rankings_for_registration(query.contest_id, query.user_id)
        .await?;

    Ok(Json(rankings.into_iter().map(Into::into).collect()))
}
