mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_censor_masks_banned_words() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    let response = server
        .post("/api/censor")
        .json(&json!({ "text": "Hello, World! FOO bar." }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["text"], "Hello, World! **** bar.");
    assert_eq!(json["censored"], true);
}

#[tokio::test]
async fn test_censor_clean_text_unchanged() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    let text = "Pantai Kuta  indah SEKALI!!!\nWajib dikunjungi.";
    let response = server
        .post("/api/censor")
        .json(&json!({ "text": text }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["text"], text);
    assert_eq!(json["censored"], false);
}

#[tokio::test]
async fn test_censor_repetition_obfuscation() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    let response = server
        .post("/api/censor")
        .json(&json!({ "text": "dasar annjjinnng kamu" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["text"], "dasar **** kamu");
}

#[tokio::test]
async fn test_censor_empty_text() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    let response = server.post("/api/censor").json(&json!({ "text": "" })).await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["text"], "");
    assert_eq!(json["censored"], false);
}

#[tokio::test]
async fn test_censor_rejects_oversized_text() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    let response = server
        .post("/api/censor")
        .json(&json!({ "text": "a".repeat(10_001) }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"].get("text").is_some());
}
