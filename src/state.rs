/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, issuer / verifier: token 発行と検証, uploads: 保存先
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{
    auth::{TokenIssuer, TokenVerifier},
    uploads::UploadStore,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    pub fn new(
        db: sqlx::PgPool,
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        uploads: Arc<UploadStore>,
    ) -> Self {
        Self {
            db,
            issuer,
            verifier,
            uploads,
        }
    }
}
