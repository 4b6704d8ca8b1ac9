//! Bearer token 検証 → claims を extensions に入れる
//!
//! Two guards share the header parsing:
//! - `authenticate_token`: end-user routes, fixed secret, inserts `UserClaims`.
//! - `authorize_role`: system routes, secret selected by the role the route
//!   demands, inserts `SystemClaims`.
//!
//! Both are stateless filters: either the claims are attached and the request
//! continues, or the request ends here with the error response.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::header,
    middleware::{self, Next},
    response::Response,
};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::services::auth::{AuthError, TokenVerifier, bearer_token};
use crate::state::AppState;

/// Protect every route of `router` with the fixed-secret end-user check.
///
/// 例：
/// ```ignore
/// let humans = access::authenticate_token(handlers::humans::routes(), state.clone());
/// ```
pub fn authenticate_token(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, user_middleware))
}

/// Protect every route of `router` with a system token check for `role`.
///
/// `"admin"` selects the admin secret; any other role selects the developer
/// secret.
pub fn authorize_role(
    router: Router<AppState>,
    state: AppState,
    role: &'static str,
) -> Router<AppState> {
    let guard = RoleGuard {
        verifier: state.verifier.clone(),
        role,
    };
    router.route_layer(middleware::from_fn_with_state(guard, role_middleware))
}

#[derive(Clone)]
struct RoleGuard {
    verifier: Arc<TokenVerifier>,
    role: &'static str,
}

fn token_from_header(req: &Request) -> Result<&str, AuthError> {
    let value = match req.headers().get(header::AUTHORIZATION) {
        Some(v) => Some(v.to_str().map_err(|_| AuthError::MalformedHeader)?),
        None => None,
    };
    bearer_token(value)
}

async fn user_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_header(&req).inspect_err(|err| {
        debug!(error = %err, uri = %req.uri(), "rejected request without usable credentials");
    })?;

    let claims = state.verifier.verify_user(token).inspect_err(|err| {
        warn!(error = %err, "access token verification failed");
    })?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

async fn role_middleware(
    State(guard): State<RoleGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_header(&req).inspect_err(|err| {
        debug!(error = %err, uri = %req.uri(), "rejected request without usable credentials");
    })?;

    let claims = guard
        .verifier
        .verify_for_role(token, guard.role)
        .inspect_err(|err| {
            warn!(error = %err, required_role = guard.role, "system token verification failed");
        })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
