use jsonwebtoken::{Algorithm, Validation};
use tracing::debug;

use crate::services::auth::claims::{Role, SystemClaims, UserClaims};
use crate::services::auth::error::AuthError;
use crate::services::auth::keys::SigningKeys;

/// Extract the token from an `Authorization` header value.
///
/// The value must consist of exactly two whitespace-separated parts; the
/// first (the scheme) is not inspected.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.unwrap_or_default();
    if header.is_empty() {
        return Err(AuthError::AccessDenied);
    }

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(token), None) => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// HS256 token verifier for both end-user and system tokens.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    keys: SigningKeys,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: SigningKeys) -> Self {
        // signature + exp; no iss/aud in these tokens
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is exact: no clock tolerance
        validation.leeway = 0;
        Self { keys, validation }
    }

    /// Verify an end-user token against the fixed secret.
    pub fn verify_user(&self, token: &str) -> Result<UserClaims, AuthError> {
        self.keys
            .user()
            .verify::<UserClaims>(token, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "user token rejected");
                AuthError::InvalidToken
            })
    }

    /// Verify a system token for a route that demands `required_role`.
    ///
    /// The secret comes from the demanded role, never from the token's own
    /// `role` claim, so a developer token cannot pass an admin route by
    /// claiming to be admin.
    pub fn verify_for_role(
        &self,
        token: &str,
        required_role: &str,
    ) -> Result<SystemClaims, AuthError> {
        let scope = Role::for_required(required_role);
        let key = self
            .keys
            .for_role(scope)
            .ok_or(AuthError::ServerMisconfiguration)?;

        key.verify::<SystemClaims>(token, &self.validation)
            .map_err(|e| {
                debug!(error = %e, required_role, "system token rejected");
                AuthError::InvalidToken
            })
    }
}
