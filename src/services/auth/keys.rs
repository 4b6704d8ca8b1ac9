use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Serialize, de::DeserializeOwned};
use tracing::error;

use crate::services::auth::claims::Role;
use crate::services::auth::error::AuthError;

/// HS256 key pair derived from one shared secret.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

impl SigningKey {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AuthError> {
        let header = Header::new(Algorithm::HS256);
        jsonwebtoken::encode(&header, claims, &self.encoding).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AuthError::Signing
        })
    }

    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        validation: &Validation,
    ) -> Result<T, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<T>(token, &self.decoding, validation)?;
        Ok(data.claims)
    }
}

/// Every secret the service signs with: the fixed end-user secret and the two
/// role secrets for system tokens. Role secrets are optional; a missing one only
/// fails the logins and routes that need it.
#[derive(Debug, Clone)]
pub struct SigningKeys {
    user: SigningKey,
    admin: Option<SigningKey>,
    dev: Option<SigningKey>,
}

impl SigningKeys {
    pub fn new(user_secret: &str, admin_secret: Option<&str>, dev_secret: Option<&str>) -> Self {
        Self {
            user: SigningKey::from_secret(user_secret),
            admin: admin_secret.map(SigningKey::from_secret),
            dev: dev_secret.map(SigningKey::from_secret),
        }
    }

    pub fn user(&self) -> &SigningKey {
        &self.user
    }

    pub fn for_role(&self, role: Role) -> Option<&SigningKey> {
        match role {
            Role::Admin => self.admin.as_ref(),
            Role::Dev => self.dev.as_ref(),
        }
    }
}
