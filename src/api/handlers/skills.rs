use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::dto::{
        common::{CreatedResponse, MessageResponse},
        skills::{CreateSkillRequest, UpdateSkillRequest},
    },
    error::AppError,
    repos::skill_repo::{self, SkillRow},
    state::AppState,
};

pub async fn create_skill(
    State(state): State<AppState>,
    payload: Result<Json<CreateSkillRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(req) = payload?;
    let name = req.validate()?;

    let row = skill_repo::create(&state.db, name, req.description.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: row.id })))
}

pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<SkillRow>>, AppError> {
    Ok(Json(skill_repo::list(&state.db).await?))
}

pub async fn get_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SkillRow>, AppError> {
    skill_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("Skill"))
}

pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateSkillRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    skill_repo::update(
        &state.db,
        id,
        req.name.as_deref(),
        req.description.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("Skill"))?;

    Ok(Json(MessageResponse::new("Skill updated")))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !skill_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Skill"));
    }
    Ok(Json(MessageResponse::new("Skill deleted")))
}
