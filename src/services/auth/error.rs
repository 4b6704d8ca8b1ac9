use axum::http::StatusCode;
use thiserror::Error;

/// Failures of token issuance and verification.
///
/// `Display` is the message returned to the client, so unknown users and
/// wrong passwords deliberately share `InvalidCredentials`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Invalid Authorization format")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT secret not configured")]
    ServerMisconfiguration,

    // stored hash could not be parsed / hashing failed
    #[error("internal server error")]
    PasswordHash,

    #[error("internal server error")]
    Signing,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::AccessDenied | AuthError::MalformedHeader => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::FORBIDDEN,
            AuthError::ServerMisconfiguration | AuthError::PasswordHash | AuthError::Signing => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
