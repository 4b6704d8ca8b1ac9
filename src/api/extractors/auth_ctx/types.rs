/*
 * Responsibility
 * - middleware ごとの「認証済みコンテキスト」の型 alias
 * - authenticate_token は UserClaims、authorize_role は SystemClaims を extensions に入れる
 */
use super::core::AuthCtx;
use crate::services::auth::{SystemClaims, UserClaims};

/// End-user routes (`authenticate_token`).
pub type UserCtx = AuthCtx<UserClaims>;

/// Role-scoped system routes (`authorize_role`).
pub type SystemCtx = AuthCtx<SystemClaims>;
