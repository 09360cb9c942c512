//! Integration tests for the registration API.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use registration_server::api::{create_router, AppState};
use registration_store::Store;
use tower::ServiceExt;

/// Create a test app backed by a file store in a temp directory.
async fn create_test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::file(dir.path().join("registrations.json"))
        .await
        .unwrap();
    (create_router(AppState::new(store)), dir)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "name": "Ana",
        "house_block": "A1",
        "phone": "081234567890",
        "category": "kids",
        "event": "lari"
    })
}

#[tokio::test]
async fn test_liveness() {
    let (app, _dir) = create_test_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    assert_eq!(body, b"Registration service is running");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = create_test_app().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["backend"], "file");
    assert_eq!(json["registrations"], 0);
}

#[tokio::test]
async fn test_register_success() {
    let (app, _dir) = create_test_app().await;

    let response = app
        .oneshot(post_json("/register", valid_submission()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["message"], "Pendaftaran berhasil. Terima kasih!");
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let (app, _dir) = create_test_app().await;

    // No phone at all
    let body = serde_json::json!({
        "name": "Ana",
        "house_block": "A1",
        "category": "kids",
        "event": "lari"
    });

    let response = app.oneshot(post_json("/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(json["message"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_register_blank_field_is_bad_request() {
    let (app, _dir) = create_test_app().await;

    let mut body = valid_submission();
    body["name"] = serde_json::json!("   ");

    let response = app.oneshot(post_json("/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_submission_is_not_persisted() {
    let (app, _dir) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/register", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(get("/participants")).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_persistence_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::file(dir.path().join("registrations.json"))
        .await
        .unwrap();
    let app = create_router(AppState::new(store));

    // Break the store's backing directory so the flush fails
    tokio::fs::remove_dir_all(dir.path()).await.unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/register", valid_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(json["message"], "Gagal menyimpan data pendaftaran.");

    // The failed submission is not silently kept
    let response = app.oneshot(get("/participants")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_participants_empty() {
    let (app, _dir) = create_test_app().await;

    let response = app.oneshot(get("/participants")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_participants_masks_phone() {
    let (app, _dir) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/register", valid_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/participants")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Ana");
    assert_eq!(entries[0]["phone"], "0812****7890");

    // The unmasked number never appears anywhere in the listing
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("081234567890"));
}

#[tokio::test]
async fn test_participants_most_recent_first() {
    let (app, _dir) = create_test_app().await;

    for name in ["first", "second", "third"] {
        let mut body = valid_submission();
        body["name"] = serde_json::json!(name);
        let response = app.clone().oneshot(post_json("/register", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = app.oneshot(get("/participants")).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();

    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["third", "second", "first"]);
}

#[tokio::test]
async fn test_download_json() {
    let (app, _dir) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/register", valid_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/download-json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=data_pendaftaran.json"
    );
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    // Export is unmasked and re-parses to the submitted fields
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ana");
    assert_eq!(rows[0]["house_block"], "A1");
    assert_eq!(rows[0]["phone"], "081234567890");
    assert_eq!(rows[0]["category"], "kids");
    assert_eq!(rows[0]["event"], "lari");
}

#[tokio::test]
async fn test_download_excel() {
    let (app, _dir) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/register", valid_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/download-excel")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=data_pendaftaran.xlsx"
    );

    let body = body_bytes(response).await;
    assert_eq!(&body[..2], b"PK");
}
