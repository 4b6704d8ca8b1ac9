/*
 * Responsibility
 * - /api/certificate handler (multipart, file field は "file")
 * - DB 書き込みに失敗したら今回保存した file を消す
 * - certificate 削除時にファイル本体は消さない
 */
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    api::{
        dto::{
            certificates::{CertificateCreatedResponse, CertificateForm, CertificateUpdatedResponse},
            common::MessageResponse,
        },
        extractors::{AuthCtx, UserCtx},
        handlers::upload_form::{UploadForm, read_upload_form},
    },
    error::AppError,
    repos::certificate_repo::{self, CertificateRow},
    services::uploads::UploadKind,
    state::AppState,
};

const FILE_FIELD: &str = "file";

fn stored_path(form: &UploadForm) -> Option<String> {
    form.file
        .as_ref()
        .map(|f| f.path.to_string_lossy().into_owned())
}

pub async fn create_certificate(
    State(state): State<AppState>,
    AuthCtx(actor): UserCtx,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CertificateCreatedResponse>), AppError> {
    let form = read_upload_form(multipart, &state.uploads, UploadKind::File, FILE_FIELD).await?;

    let result = async {
        let input = CertificateForm::from_fields(&form.fields, true)?;
        let row = certificate_repo::create(
            &state.db,
            input.human_id.unwrap_or_default(),
            input.description.as_deref(),
            stored_path(&form).as_deref(),
            input.issued_at,
        )
        .await?;
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

    info!(certificate_id = row.id, actor = actor.user_id, "certificate created");

    Ok((
        StatusCode::CREATED,
        Json(CertificateCreatedResponse {
            id: row.id,
            file: form.file_url(),
        }),
    ))
}

pub async fn list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CertificateRow>>, AppError> {
    Ok(Json(certificate_repo::list(&state.db).await?))
}

pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CertificateRow>, AppError> {
    certificate_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("Certificate"))
}

pub async fn update_certificate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<CertificateUpdatedResponse>, AppError> {
    let form = read_upload_form(multipart, &state.uploads, UploadKind::File, FILE_FIELD).await?;

    let result = async {
        let input = CertificateForm::from_fields(&form.fields, false)?;
        certificate_repo::update(
            &state.db,
            id,
            input.description.as_deref(),
            stored_path(&form).as_deref(),
            input.issued_at,
        )
        .await?
        .ok_or(AppError::not_found("Certificate"))
    }
    .await;

    if let Err(e) = result {
        form.discard_file().await;
        return Err(e);
    }

    Ok(Json(CertificateUpdatedResponse {
        message: "Certificate updated",
        file: form.file_url(),
    }))
}

pub async fn delete_certificate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !certificate_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Certificate"));
    }

    Ok(Json(MessageResponse::new("Certificate deleted")))
}
