use std::fmt;

use serde::{Deserialize, Serialize};

/// Service account roles. Only two signing secrets exist, one per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dev,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Dev => "dev",
        }
    }

    /// Secret scope for a role demanded by a route.
    ///
    /// Only "admin" maps to the admin secret; every other name, known or not,
    /// maps to the developer secret.
    pub fn for_required(required_role: &str) -> Self {
        if required_role == "admin" {
            Role::Admin
        } else {
            Role::Dev
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    System,
}

/// Claims of a token issued by system login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemClaims {
    pub username: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Claims of a token issued by end-user login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    pub user_id: i64,
    pub human_id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_admin_selects_the_admin_scope() {
        assert_eq!(Role::for_required("admin"), Role::Admin);
        assert_eq!(Role::for_required("dev"), Role::Dev);
    }

    #[test]
    fn unknown_required_roles_fall_back_to_the_developer_scope() {
        assert_eq!(Role::for_required("auditor"), Role::Dev);
        assert_eq!(Role::for_required("Admin"), Role::Dev);
        assert_eq!(Role::for_required(""), Role::Dev);
    }

    #[test]
    fn system_claims_use_the_wire_field_names() {
        let claims = SystemClaims {
            username: "admin1".to_string(),
            role: Role::Admin,
            kind: TokenKind::System,
            iat: 1,
            exp: 2,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            json!({"username": "admin1", "role": "admin", "type": "system", "iat": 1, "exp": 2})
        );
    }

    #[test]
    fn user_claims_are_camel_case() {
        let value = json!({"userId": 7, "humanId": 3, "email": "a@b.io", "iat": 1, "exp": 2});
        let claims: UserClaims = serde_json::from_value(value).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.human_id, 3);
    }
}
