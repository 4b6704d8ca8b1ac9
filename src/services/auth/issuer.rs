use chrono::Utc;
use tracing::{debug, info, warn};

use crate::services::auth::accounts::ServiceAccounts;
use crate::services::auth::claims::{Role, SystemClaims, TokenKind, UserClaims};
use crate::services::auth::error::AuthError;
use crate::services::auth::keys::SigningKey;
use crate::services::auth::password::verify_password;

/// Lifetime of every token this service issues.
pub const TOKEN_TTL_SECONDS: i64 = 2 * 60 * 60;

/// Result of a successful system login.
#[derive(Debug, Clone)]
pub struct IssuedSystemToken {
    pub token: String,
    pub role: Role,
}

/// Issues system tokens (service accounts) and end-user tokens.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    accounts: ServiceAccounts,
    user_key: SigningKey,
    ttl_seconds: i64,
}

impl TokenIssuer {
    pub fn new(accounts: ServiceAccounts, user_key: SigningKey) -> Self {
        Self {
            accounts,
            user_key,
            ttl_seconds: TOKEN_TTL_SECONDS,
        }
    }

    /// Authenticate a service account and issue a token signed with its role
    /// secret.
    ///
    /// Blocking: runs bcrypt.
    pub fn system_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSystemToken, AuthError> {
        let Some(candidate) = self.accounts.find(username) else {
            debug!("system login for unknown username");
            // same bcrypt cost as a known account; result discarded
            if let Some(decoy) = self.accounts.decoy_hash() {
                let _ = verify_password(password, decoy);
            }
            return Err(AuthError::InvalidCredentials);
        };

        let Some(key) = candidate.signing_key.as_ref() else {
            warn!(role = %candidate.role, "no signing secret configured for role");
            return Err(AuthError::ServerMisconfiguration);
        };

        if !verify_password(password, &candidate.password_hash)? {
            debug!(username = %candidate.username, "system login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let claims = SystemClaims {
            username: candidate.username.clone(),
            role: candidate.role,
            kind: TokenKind::System,
            iat: now,
            exp: now + self.ttl_seconds,
        };
        let token = key.sign(&claims)?;

        info!(username = %candidate.username, role = %candidate.role, "system token issued");

        Ok(IssuedSystemToken {
            token,
            role: candidate.role,
        })
    }

    /// Issue an end-user token signed with the fixed secret. The caller has
    /// already checked the password.
    pub fn issue_user_token(
        &self,
        user_id: i64,
        human_id: i64,
        email: &str,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            user_id,
            human_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        self.user_key.sign(&claims)
    }
}
