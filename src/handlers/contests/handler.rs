//! Contest handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    container::Container,
    error::AppResult,
    models::Contest,
    utils::sanitize_string,
};

use super::{
    request::{ContestRequest, ListContestsQuery},
    response::ContestResponse,
};

/// List all contests, or only the most recent ones with `?limit=`
pub async fn list_contests(
    State(container): State<Container>,
    Query(query): Query<ListContestsQuery>,
) -> AppResult<Json<Vec<ContestResponse>>> {
    let interactor = container.contest_interactor();
    let contests = match query.limit {
        Some(limit) => interactor.recent(limit).await?,
        None => interactor.all().await?,
    };

    Ok(Json(contests.into_iter().map(Into::into).collect()))
}

/// Get a single contest
pub async fn get_contest(
    State(container): State<Container>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContestResponse>> {
    let contest = container.contest_interactor().find(id).await?;

    Ok(Json(contest.into()))
}

/// Create a contest
pub async fn create_contest(
    State(container): State<Container>,
    Json(payload): Json<ContestRequest>,
) -> AppResult<(StatusCode, Json<ContestResponse>)> {
    payload.validate()?;

    let contest = container
        .contest_interactor()
        .create_contest(into_contest(0, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(contest.into())))
}

/// Update a contest
pub async fn update_contest(
    State(container): State<Container>,
    Path(id): Path<i64>,
    Json(payload): Json<ContestRequest>,
) -> AppResult<Json<ContestResponse>> {
    payload.validate()?;

    let contest = container
        .contest_interactor()
        .update_contest(into_contest(id, payload))
        .await?;

    Ok(Json(contest.into()))
}

fn into_contest(id: i64, payload: ContestRequest) -> Contest {
    Contest {
        id,
        description: sanitize_string(&payload.description),
        start: payload.start,
        end: payload.end,
        open: payload.open,
    }
}
