/*
 * Responsibility
 * - /api/human CRUD handler
 * - detail は子テーブル 6 本を並行に取りに行く (try_join!)
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    api::dto::{
        common::MessageResponse,
        humans::{CreateHumanRequest, HumanDetailResponse, UpdateHumanRequest},
    },
    error::AppError,
    repos::{
        card_repo, certificate_repo, facial_repo,
        human_repo::{self, HumanRow},
        skill_repo, space_time_repo, user_repo,
    },
    state::AppState,
};

/// Space-time points embedded in the detail view.
const DETAIL_SPACE_TIME_LIMIT: i64 = 50;

pub async fn create_human(
    State(state): State<AppState>,
    payload: Result<Json<CreateHumanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(req) = payload?;
    let new = req.validate()?;

    let row = human_repo::create(&state.db, &new).await?;
    info!(human_id = row.id, "human created");

    Ok((
        StatusCode::CREATED,
        Json(json!({"id": row.id, "message": "Human created"})),
    ))
}

pub async fn list_humans(State(state): State<AppState>) -> Result<Json<Vec<HumanRow>>, AppError> {
    Ok(Json(human_repo::list(&state.db).await?))
}

pub async fn get_human(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HumanDetailResponse>, AppError> {
    let human = human_repo::get(&state.db, id)
        .await?
        .ok_or(AppError::not_found("Human"))?;

    let db = &state.db;
    let (users, skills, certificates, facial_recognitions, cards, space_time) = tokio::try_join!(
        user_repo::list_by_human(db, id),
        skill_repo::list_by_human(db, id),
        certificate_repo::list_by_human(db, id),
        facial_repo::list_by_human(db, id),
        card_repo::list_by_human(db, id),
        space_time_repo::latest_for_human(db, id, DETAIL_SPACE_TIME_LIMIT),
    )?;

    Ok(Json(HumanDetailResponse {
        human,
        users,
        skills,
        certificates,
        facial_recognitions,
        cards,
        space_time,
    }))
}

pub async fn update_human(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateHumanRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    let changes = req.validate()?;

    human_repo::update(&state.db, id, &changes)
        .await?
        .ok_or(AppError::not_found("Human"))?;

    Ok(Json(MessageResponse::new("Human updated")))
}

pub async fn delete_human(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !human_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Human"));
    }

    info!(human_id = id, "human deleted");
    Ok(Json(MessageResponse::new("Human deleted")))
}
