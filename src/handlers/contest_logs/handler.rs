//! Contest log handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    container::Container,
    error::AppResult,
    middleware::CurrentUser,
    models::ContestLog,
    utils::sanitize_string,
};

use super::{
    request::{CreateLogRequest, ListLogsQuery, UpdateLogRequest},
    response::ContestLogResponse,
};

/// Submit a log for the caller
pub async fn create_log(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateLogRequest>,
) -> AppResult<(StatusCode, Json<ContestLogResponse>)> {
    payload.validate()?;

    let log = container
        .ranking_interactor()
        .create_log(ContestLog {
            id: 0,
            contest_id: payload.contest_id,
            user_id: user.id,
            language_code: payload.language_code,
            medium_id: payload.medium_id,
            amount: payload.amount,
            description: sanitize_string(&payload.description),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(log.into())))
}

/// Logs of a user in a contest
pub async fn list_logs(
    State(container): State<Container>,
    Query(query): Query<ListLogsQuery>,
) -> AppResult<Json<Vec<ContestLogResponse>>> {
    let logs = container
        .ranking_interactor()
        .contest_logs(query.contest_id, query.user_id)
        .await?;

    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

/// Update one of the caller's logs
pub async fn update_log(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLogRequest>,
) -> AppResult<Json<ContestLogResponse>> {
    payload.validate()?;

    let log = container
        .ranking_interactor()
        .update_log(
            ContestLog {
                id,
                // Filled in from the stored log
                contest_id: 0,
                user_id: user.id,
                language_code: payload.language_code,
                medium_id: payload.medium_id,
                amount: payload.amount,
                description: sanitize_string(&payload.description),
            },
            user.id,
        )
        .await?;

    Ok(Json(log.into()))
}

/// Delete one of the caller's logs
pub async fn delete_log(
    State(container): State<Container>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    container.ranking_interactor().delete_log(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
