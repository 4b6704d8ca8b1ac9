pub mod accounts;
pub mod claims;
pub mod error;
pub mod factory;
pub mod issuer;
pub mod keys;
pub mod password;
pub mod verifier;

pub use accounts::{ServiceAccounts, ServiceCredential};
pub use claims::{Role, SystemClaims, UserClaims};
pub use error::AuthError;
pub use factory::build_auth_services;
pub use issuer::{IssuedSystemToken, TOKEN_TTL_SECONDS, TokenIssuer};
pub use keys::{SigningKey, SigningKeys};
pub use verifier::{TokenVerifier, bearer_token};
