use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::dto::{
        common::{CreatedResponse, MessageResponse},
        specialities::{CreateSpecialityRequest, UpdateSpecialityRequest},
    },
    error::AppError,
    repos::speciality_repo::{self, SpecialityRow},
    state::AppState,
};

pub async fn create_speciality(
    State(state): State<AppState>,
    payload: Result<Json<CreateSpecialityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(req) = payload?;
    let description = req.validate()?;

    let row = speciality_repo::create(&state.db, description).await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: row.id })))
}

pub async fn list_specialities(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpecialityRow>>, AppError> {
    Ok(Json(speciality_repo::list(&state.db).await?))
}

pub async fn get_speciality(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SpecialityRow>, AppError> {
    speciality_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("Speciality"))
}

pub async fn update_speciality(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateSpecialityRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    speciality_repo::update(&state.db, id, req.description.as_deref())
        .await?
        .ok_or(AppError::not_found("Speciality"))?;

    Ok(Json(MessageResponse::new("Speciality updated")))
}

pub async fn delete_speciality(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !speciality_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Speciality"));
    }
    Ok(Json(MessageResponse::new("Speciality deleted")))
}
