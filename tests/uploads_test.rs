//! Multipart handling on the upload routes. Every case here is decided
//! before any database work.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;

mod common;
use common::{Part, TestApp, file, json_body, multipart_body, test_app, text};

const BOUNDARY: &str = "X-TEST-BOUNDARY";

async fn post_multipart(
    app: &TestApp,
    uri: &str,
    parts: &[Part],
) -> axum::http::Response<Body> {
    let token = app.user_token();
    app.send(
        Request::builder()
            .uri(uri)
            .method(Method::POST)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(BOUNDARY, parts)))
            .unwrap(),
    )
    .await
}

fn stored_files(app: &TestApp, dir: &str) -> usize {
    std::fs::read_dir(app.upload_dir.path().join(dir))
        .unwrap()
        .count()
}

#[tokio::test]
async fn facial_without_hash_or_image_is_rejected() {
    let app = test_app().await;

    let res = post_multipart(&app, "/api/facial_recognition", &[text("human_id", "1")]).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(res).await,
        json!({"error": "No facial_data_hash provided or file uploaded"})
    );
}

#[tokio::test]
async fn facial_requires_integer_human_id() {
    let app = test_app().await;

    let res = post_multipart(
        &app,
        "/api/facial_recognition",
        &[text("facial_data_hash", "abc")],
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["errors"][0]["path"], "human_id");
}

#[tokio::test]
async fn facial_rejects_non_image_uploads() {
    let app = test_app().await;

    let res = post_multipart(
        &app,
        "/api/facial_recognition",
        &[
            text("human_id", "1"),
            file("face", "face.pdf", "application/pdf", b"%PDF-1.4"),
        ],
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(res).await,
        json!({"error": "Invalid facial image type"})
    );
    assert_eq!(stored_files(&app, "facial"), 0);
}

#[tokio::test]
async fn certificate_rejects_unknown_file_types() {
    let app = test_app().await;

    let res = post_multipart(
        &app,
        "/api/certificate",
        &[
            text("human_id", "1"),
            file("file", "notes.txt", "text/plain", b"hello"),
        ],
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({"error": "Invalid file type"}));
}

#[tokio::test]
async fn unexpected_file_field_removes_what_was_stored() {
    let app = test_app().await;

    let res = post_multipart(
        &app,
        "/api/certificate",
        &[
            file("file", "scan.png", "image/png", b"\x89PNG...."),
            file("other", "extra.png", "image/png", b"\x89PNG...."),
        ],
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({"error": "Unexpected field"}));
    assert_eq!(stored_files(&app, "files"), 0);
}

#[tokio::test]
async fn certificate_validation_failure_discards_the_upload() {
    let app = test_app().await;

    let res = post_multipart(
        &app,
        "/api/certificate",
        &[
            text("human_id", "not-a-number"),
            file("file", "scan.pdf", "application/pdf", b"%PDF-1.4"),
        ],
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["errors"][0]["path"], "human_id");
    assert_eq!(stored_files(&app, "files"), 0);
}

#[tokio::test]
async fn uploads_need_a_token() {
    let app = test_app().await;

    let res = app
        .send(
            Request::builder()
                .uri("/api/certificate")
                .method(Method::POST)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body(BOUNDARY, &[])))
                .unwrap(),
        )
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
