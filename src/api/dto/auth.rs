/*
 * Responsibility
 * - /api/auth の request/response DTO
 * - system-login (service account) と end-user login/register を分ける
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::dto::validation::Validator;
use crate::error::AppError;
use crate::services::auth::Role;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Fields stay untyped so a non-string value is reported per field instead
/// of failing the whole body.
#[derive(Debug, Deserialize)]
pub struct SystemLoginRequest {
    pub username: Option<Value>,
    pub password: Option<Value>,
}

impl SystemLoginRequest {
    /// Both fields must be non-empty strings; returns them borrowed.
    pub fn validate(&self) -> Result<(&str, &str), AppError> {
        let username = self.username.as_ref().and_then(Value::as_str);
        let password = self.password.as_ref().and_then(Value::as_str);

        let mut v = Validator::new();
        v.non_empty("username", username)
            .non_empty("password", password);
        v.finish()?;

        match (username, password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::Internal),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemLoginResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(&str, &str), AppError> {
        let mut v = Validator::new();
        v.email("email", self.email.as_deref())
            .required("password", self.password.as_deref());
        v.finish()?;

        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::Internal),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub unique_id: Option<String>,
    pub legal_id: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.email("email", self.email.as_deref())
            .min_chars("password", self.password.as_deref(), MIN_PASSWORD_CHARS)
            .required("name", self.name.as_deref())
            .required("lastname", self.lastname.as_deref());
        v.finish()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub human_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        if self.email.is_some() {
            v.email("email", self.email.as_deref());
        }
        if self.password.is_some() {
            v.min_chars("password", self.password.as_deref(), MIN_PASSWORD_CHARS);
        }
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(email.into()),
            password: Some(password.into()),
            name: Some(name.into()),
            lastname: Some("Lovelace".into()),
            unique_id: None,
            legal_id: None,
            birthdate: None,
            gender: None,
        }
    }

    #[test]
    fn system_login_requires_both_fields() {
        let req: SystemLoginRequest = serde_json::from_str(r#"{"username": "admin1"}"#).unwrap();
        assert!(matches!(req.validate(), Err(AppError::Validation(e)) if e.len() == 1));

        let req: SystemLoginRequest =
            serde_json::from_str(r#"{"username": "admin1", "password": "pw"}"#).unwrap();
        assert_eq!(req.validate().unwrap(), ("admin1", "pw"));
    }

    #[test]
    fn system_login_whitespace_is_a_value() {
        let req: SystemLoginRequest =
            serde_json::from_str(r#"{"username": " ", "password": "x"}"#).unwrap();
        assert_eq!(req.validate().unwrap(), (" ", "x"));
    }

    #[test]
    fn system_login_non_strings_are_field_errors() {
        let req: SystemLoginRequest =
            serde_json::from_str(r#"{"username": 5, "password": ["x"]}"#).unwrap();
        match req.validate() {
            Err(AppError::Validation(errors)) => {
                let paths: Vec<_> = errors.iter().map(|e| e.path).collect();
                assert_eq!(paths, ["username", "password"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn register_checks_email_password_and_names() {
        assert!(register("ada@example.com", "secret", "Ada").validate().is_ok());
        assert!(register("not-an-email", "secret", "Ada").validate().is_err());
        assert!(register("ada@example.com", "short", "Ada").validate().is_err());
        assert!(register("ada@example.com", "secret", " ").validate().is_err());
    }

    #[test]
    fn update_user_ignores_absent_fields() {
        let req = UpdateUserRequest {
            email: None,
            password: None,
        };
        assert!(req.validate().is_ok());

        let req = UpdateUserRequest {
            email: Some("bad".into()),
            password: None,
        };
        assert!(req.validate().is_err());
    }
}
