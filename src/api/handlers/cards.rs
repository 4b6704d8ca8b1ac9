/*
 * Responsibility
 * - /api/card CRUD handler
 * - list は account_number なし、get は全項目
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

use crate::{
    api::{
        dto::{
            cards::{CreateCardRequest, UpdateCardRequest},
            common::{CreatedResponse, MessageResponse},
        },
        extractors::{AuthCtx, UserCtx},
    },
    error::AppError,
    repos::card_repo::{self, CardRow, CardSummaryRow},
    state::AppState,
};

pub async fn create_card(
    State(state): State<AppState>,
    AuthCtx(actor): UserCtx,
    payload: Result<Json<CreateCardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(req) = payload?;
    let new = req.validate()?;

    let row = card_repo::create(&state.db, new.human_id, new.account_number, &new.fields).await?;
    info!(card_id = row.id, human_id = row.human_id, actor = actor.user_id, "card created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: row.id })))
}

pub async fn list_cards(
    State(state): State<AppState>,
) -> Result<Json<Vec<CardSummaryRow>>, AppError> {
    Ok(Json(card_repo::list(&state.db).await?))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CardRow>, AppError> {
    card_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("Card"))
}

pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    let fields = req.validate()?;

    card_repo::update(&state.db, id, &fields)
        .await?
        .ok_or(AppError::not_found("Card"))?;

    Ok(Json(MessageResponse::new("Card updated")))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !card_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Card"));
    }
    Ok(Json(MessageResponse::new("Card deleted")))
}
