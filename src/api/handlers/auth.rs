/*
 * Responsibility
 * - /api/auth 系 handler
 *   - system-login: service account → role secret で署名した system token
 *   - login / register: end-user (users テーブル) → 固定 secret の token
 *   - users の一覧/取得/更新/削除 (authenticate_token 配下)
 * - bcrypt は CPU を食うので spawn_blocking に逃がす
 */
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{debug, error, info};

use crate::{
    api::{
        dto::{
            auth::{
                LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SystemLoginRequest,
                SystemLoginResponse, UpdateUserRequest,
            },
            common::MessageResponse,
        },
        extractors::{AuthCtx, UserCtx},
    },
    error::AppError,
    repos::{
        human_repo::{self, NewHuman},
        user_repo::{self, UserRow},
    },
    services::auth::{AuthError, password},
    state::AppState,
};

/// Run a blocking closure (bcrypt) off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!(error = %e, "blocking task failed");
            AppError::Internal
        })?
        .map_err(AppError::from)
}

pub async fn system_login(
    State(state): State<AppState>,
    payload: Result<Json<SystemLoginRequest>, JsonRejection>,
) -> Result<Json<SystemLoginResponse>, AppError> {
    let Json(req) = payload?;
    let (username, password) = req.validate()?;
    let (username, password) = (username.to_string(), password.to_string());

    let issuer = state.issuer.clone();
    let issued = blocking(move || issuer.system_login(&username, &password)).await?;

    Ok(Json(SystemLoginResponse {
        token: issued.token,
        role: issued.role,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    let (email, password) = req.validate()?;

    let Some(user) = user_repo::find_credentials(&state.db, email).await? else {
        debug!("login for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    let password = password.to_string();
    let hash = user.encrypted_password.clone();
    let matches = blocking(move || password::verify_password(&password, &hash)).await?;
    if !matches {
        debug!(user_id = user.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state
        .issuer
        .issue_user_token(user.id, user.human_id, email)?;
    info!(user_id = user.id, "user token issued");

    Ok(Json(LoginResponse { token }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let email = req.email.as_deref().unwrap_or_default();
    let human = human_repo::create(
        &state.db,
        &NewHuman {
            unique_id: req.unique_id.as_deref(),
            legal_id: req.legal_id.as_deref(),
            name: req.name.as_deref().unwrap_or_default(),
            lastname: req.lastname.as_deref().unwrap_or_default(),
            birthdate: req.birthdate,
            gender: req.gender.as_deref(),
        },
    )
    .await?;

    let password = req.password.clone().unwrap_or_default();
    let hash = blocking(move || password::hash_password(&password)).await?;

    user_repo::create(&state.db, human.id, email, &hash)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Email already registered"),
            other => other,
        })?;

    info!(human_id = human.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered",
            human_id: human.id,
        }),
    ))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRow>>, AppError> {
    Ok(Json(user_repo::list(&state.db).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserRow>, AppError> {
    user_repo::get(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::not_found("User"))
}

pub async fn update_user(
    State(state): State<AppState>,
    AuthCtx(actor): UserCtx,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let hash = match req.password.clone() {
        Some(password) => Some(blocking(move || password::hash_password(&password)).await?),
        None => None,
    };

    user_repo::update(&state.db, id, req.email.as_deref(), hash.as_deref())
        .await?
        .ok_or(AppError::not_found("User"))?;

    info!(user_id = id, actor = actor.user_id, "user updated");
    Ok(Json(MessageResponse::new("User updated")))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AuthCtx(actor): UserCtx,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    if !user_repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("User"));
    }

    info!(user_id = id, actor = actor.user_id, "user deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}
