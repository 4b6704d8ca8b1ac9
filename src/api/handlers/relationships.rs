/*
 * Responsibility
 * - human_skill / skill_speciality の link / unlink
 * - 存在しない id は FK 違反 → 400、重複 link は 409
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::debug;

use crate::{
    api::dto::{
        common::MessageResponse,
        relationships::{HumanSkillRequest, SkillSpecialityRequest},
    },
    error::AppError,
    repos::relationship_repo,
    state::AppState,
};

pub async fn link_human_skill(
    State(state): State<AppState>,
    payload: Result<Json<HumanSkillRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(req) = payload?;
    let (human_id, skill_id) = req.validate()?;

    relationship_repo::link_human_skill(&state.db, human_id, skill_id).await?;
    debug!(human_id, skill_id, "human linked to skill");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Linked human -> skill")),
    ))
}

pub async fn unlink_human_skill(
    State(state): State<AppState>,
    payload: Result<Json<HumanSkillRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    let (human_id, skill_id) = req.validate()?;

    if !relationship_repo::unlink_human_skill(&state.db, human_id, skill_id).await? {
        return Err(AppError::not_found("Relationship"));
    }
    Ok(Json(MessageResponse::new("Unlinked")))
}

pub async fn link_skill_speciality(
    State(state): State<AppState>,
    payload: Result<Json<SkillSpecialityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(req) = payload?;
    let (skill_id, speciality_id) = req.validate()?;

    relationship_repo::link_skill_speciality(&state.db, skill_id, speciality_id).await?;
    debug!(skill_id, speciality_id, "skill linked to speciality");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Linked skill -> speciality")),
    ))
}

pub async fn unlink_skill_speciality(
    State(state): State<AppState>,
    payload: Result<Json<SkillSpecialityRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    let (skill_id, speciality_id) = req.validate()?;

    if !relationship_repo::unlink_skill_speciality(&state.db, skill_id, speciality_id).await? {
        return Err(AppError::not_found("Relationship"));
    }
    Ok(Json(MessageResponse::new("Unlinked")))
}
