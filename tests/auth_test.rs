//! Token issuing and route guards, end to end through the router.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{json_body, test_app, test_app_with};

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;

    let res = app.get_with_auth("/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn admin_login_then_admin_route() {
    let app = test_app().await;

    let res = app
        .post_json(
            "/api/auth/system-login",
            json!({"username": "admin1", "password": "correctpw"}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["role"], "admin");
    let token = body["token"].as_str().unwrap();

    let res = app
        .get_with_auth("/api/system/admin/session", Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let claims = json_body(res).await;
    assert_eq!(claims["username"], "admin1");
    assert_eq!(claims["role"], "admin");
    assert_eq!(claims["type"], "system");
}

#[tokio::test]
async fn admin_token_is_rejected_on_dev_route() {
    let app = test_app().await;
    let token = app.system_token("admin1", "correctpw").await;

    let res = app
        .get_with_auth("/api/system/dev/session", Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(res).await, json!({"error": "Invalid token"}));
}

#[tokio::test]
async fn dev_login_works_on_dev_route_only() {
    let app = test_app().await;
    let token = app.system_token("dev1", "devpw").await;
    let header = format!("Bearer {token}");

    let res = app
        .get_with_auth("/api/system/dev/session", Some(&header))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["role"], "dev");

    let res = app
        .get_with_auth("/api/system/admin/session", Some(&header))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = test_app().await;

    let wrong = app
        .post_json(
            "/api/auth/system-login",
            json!({"username": "admin1", "password": "nope"}),
        )
        .await;
    let unknown = app
        .post_json(
            "/api/auth/system-login",
            json!({"username": "ghost", "password": "nope"}),
        )
        .await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let expected = json!({"error": "Invalid credentials"});
    assert_eq!(json_body(wrong).await, expected);
    assert_eq!(json_body(unknown).await, expected);
}

#[tokio::test]
async fn system_login_lists_missing_fields() {
    let app = test_app().await;

    let res = app
        .post_json("/api/auth/system-login", json!({"username": ""}))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = json_body(res).await;
    let paths: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, ["username", "password"]);
}

#[tokio::test]
async fn system_login_whitespace_username_is_checked_as_credentials() {
    let app = test_app().await;

    let res = app
        .post_json(
            "/api/auth/system-login",
            json!({"username": " ", "password": "x"}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await, json!({"error": "Invalid credentials"}));
}

#[tokio::test]
async fn system_login_non_string_fields_are_listed() {
    let app = test_app().await;

    let res = app
        .post_json(
            "/api/auth/system-login",
            json!({"username": 5, "password": "correctpw"}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = json_body(res).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["path"], "username");
    assert_eq!(body["errors"][0]["location"], "body");
}

#[tokio::test]
async fn account_without_role_secret_is_a_server_error() {
    let app = test_app_with(|config| config.jwt_secret_admin = None).await;

    let res = app
        .post_json(
            "/api/auth/system-login",
            json!({"username": "admin1", "password": "correctpw"}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(res).await,
        json!({"error": "JWT secret not configured"})
    );
}

#[tokio::test]
async fn protected_route_without_header_is_denied() {
    let app = test_app().await;

    let res = app.get_with_auth("/api/human", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(res).await, json!({"error": "Access denied"}));
}

#[tokio::test]
async fn single_part_header_is_malformed() {
    let app = test_app().await;
    let token = app.user_token();

    let res = app.get_with_auth("/api/human", Some(&token)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(res).await,
        json!({"error": "Invalid Authorization format"})
    );
}

#[tokio::test]
async fn garbage_token_is_forbidden() {
    let app = test_app().await;

    let res = app
        .get_with_auth("/api/skill", Some("Bearer not.a.jwt"))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(res).await, json!({"error": "Invalid token"}));
}

#[tokio::test]
async fn system_token_does_not_open_user_routes() {
    let app = test_app().await;
    let token = app.system_token("admin1", "correctpw").await;

    let res = app
        .get_with_auth("/api/card", Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_token_does_not_open_system_routes() {
    let app = test_app().await;
    let token = app.user_token();

    let res = app
        .get_with_auth("/api/system/admin/session", Some(&format!("Bearer {token}")))
        .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_validates_before_touching_the_database() {
    let app = test_app().await;

    let res = app
        .post_json(
            "/api/auth/register",
            json!({"email": "not-an-email", "password": "123", "name": "Ada"}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = json_body(res).await;
    let paths: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, ["email", "password", "lastname"]);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = test_app().await;

    let res = app.get_with_auth("/health", None).await;
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert_eq!(res.headers()["x-frame-options"], "DENY");
}
