//! bcrypt wrappers. Both calls are CPU-bound; async callers run them on the
//! blocking pool.
use tracing::error;

use crate::services::auth::error::AuthError;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        error!(error = %e, "failed to hash password");
        AuthError::PasswordHash
    })
}

/// Constant-time comparison of `password` against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| {
        error!(error = %e, "stored password hash is not a valid bcrypt hash");
        AuthError::PasswordHash
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_and_rejects_other_passwords() {
        let hash = bcrypt::hash("correctpw", 4).unwrap();
        assert!(verify_password("correctpw", &hash).unwrap());
        assert!(!verify_password("wrongpw", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_mismatch() {
        assert_eq!(
            verify_password("correctpw", "plaintext"),
            Err(AuthError::PasswordHash)
        );
    }
}
