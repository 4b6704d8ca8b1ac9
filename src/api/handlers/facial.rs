/*
 * Responsibility
 * - /api/facial_recognition handler (multipart, image field は "face")
 * - 画像があればその SHA-256 を facial_data_hash として保存する
 */
use axum::{
    Json,
    extract::{Multipart, Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

use crate::{
    api::{
        dto::{
            common::MessageResponse,
            facial::{FacialCreatedResponse, FacialForm, ValidateFacialRequest},
        },
        handlers::upload_form::read_upload_form,
    },
    error::AppError,
    repos::facial_repo::{self, FacialRow},
    services::uploads::UploadKind,
    state::AppState,
};

const FACE_FIELD: &str = "face";

pub async fn create_facial(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FacialCreatedResponse>), AppError> {
    let form = read_upload_form(multipart, &state.uploads, UploadKind::Facial, FACE_FIELD).await?;

    let result = async {
        let input = FacialForm::from_fields(&form.fields)?;
        let human_id = input.human_id;
        let hash = input.resolve_hash(form.file.as_ref().map(|f| f.sha256.as_str()))?;
        let row = facial_repo::create(&state.db, human_id, &hash).await?;
        Ok::<_, AppError>(row)
    }
    .await;

    let row = match result {
        Ok(row) => row,
        Err(e) => {
            form.discard_file().await;
            return Err(e);
        }
    };

    info!(facial_id = row.id, human_id = row.human_id, "facial recognition stored");

    Ok((
        StatusCode::CREATED,
        Json(FacialCreatedResponse {
            id: row.id,
            facial_hash: row.facial_data_hash,
            file: form.file_url(),
        }),
    ))
}

pub async fn list_facial(State(state): State<AppState>) -> Result<Json<Vec<FacialRow>>, AppError> {
    Ok(Json(facial_repo::list(&state.db).await?))
}

pub async fn get_facial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FacialRow>, AppError> {
    facial_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("Facial recognition"))
}

pub async fn validate_facial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ValidateFacialRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;

    facial_repo::set_validation(&state.db, id, req.facial_validation)
        .await?
        .ok_or(AppError::not_found("Facial recognition"))?;

    info!(facial_id = id, validated = req.facial_validation, "facial validation updated");
    Ok(Json(MessageResponse::new("Facial recognition updated")))
}

pub async fn delete_facial(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !facial_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Facial recognition"));
    }

    Ok(Json(MessageResponse::new("Facial recognition deleted")))
}
