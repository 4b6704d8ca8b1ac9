/*
 * Responsibility
 * - role-scoped system routes (authorize_role 配下)
 * - 検証済みの SystemClaims をそのまま返す
 */
use axum::Json;

use crate::{
    api::extractors::{AuthCtx, SystemCtx},
    services::auth::SystemClaims,
};

pub async fn session(AuthCtx(claims): SystemCtx) -> Json<SystemClaims> {
    Json(claims)
}
