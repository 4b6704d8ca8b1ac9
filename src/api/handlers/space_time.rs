use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::dto::{
        common::{CreatedResponse, MessageResponse},
        space_time::{CreateSpaceTimeRequest, UpdateSpaceTimeRequest},
    },
    error::AppError,
    repos::space_time_repo::{self, SpaceTimeRow},
    state::AppState,
};

/// Newest points returned by the list endpoint.
const LIST_LIMIT: i64 = 200;

pub async fn create_space_time(
    State(state): State<AppState>,
    payload: Result<Json<CreateSpaceTimeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(req) = payload?;
    let (human_id, longitude, latitude) = req.validate()?;

    let row =
        space_time_repo::create(&state.db, human_id, longitude, latitude, req.timestamp).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: row.id })))
}

pub async fn list_space_time(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpaceTimeRow>>, AppError> {
    Ok(Json(space_time_repo::latest(&state.db, LIST_LIMIT).await?))
}

pub async fn get_space_time(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SpaceTimeRow>, AppError> {
    space_time_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("Space time"))
}

pub async fn update_space_time(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateSpaceTimeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    space_time_repo::update(
        &state.db,
        id,
        req.longitude.as_deref(),
        req.latitude.as_deref(),
        req.timestamp,
    )
    .await?
    .ok_or(AppError::not_found("Space time"))?;

    Ok(Json(MessageResponse::new("Space time updated")))
}

pub async fn delete_space_time(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !space_time_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Space time"));
    }
    Ok(Json(MessageResponse::new("Space time deleted")))
}
