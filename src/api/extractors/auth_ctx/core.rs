use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthError;

/// Handler で claims を受け取るための extractor
/// middleware が claims を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（ミドルウェア未設定）
#[derive(Debug, Clone)]
pub struct AuthCtx<C>(pub C);

impl<S, C> FromRequestParts<S> for AuthCtx<C>
where
    S: Send + Sync,
    C: Clone + Send + Sync + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<C>()
            .cloned()
            .map(AuthCtx)
            .ok_or(AppError::Auth(AuthError::AccessDenied))
    }
}
