mod common;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::Value;

#[tokio::test]
async fn test_review_with_photo() {
    let (state, dir) = common::create_test_state();
    let server = common::api_server(state);

    let form = MultipartForm::new()
        .add_text("rating", "5")
        .add_text("komentar", "Tempatnya bagus, pemandu ramah!")
        .add_part("foto", common::photo("borobudur.jpg", common::JPEG));
    let response = server.post("/api/reviews").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["rating"], 5);
    assert_eq!(json["komentar"], "Tempatnya bagus, pemandu ramah!");
    assert_eq!(json["censored"], false);
    assert_eq!(json["photos"].as_array().unwrap().len(), 1);
    assert_eq!(common::stored_files(dir.path()).len(), 1);
}

#[tokio::test]
async fn test_review_comment_is_censored() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    let form = MultipartForm::new()
        .add_text("rating", "1")
        .add_text("komentar", "Pelayanan BANGSAT, parkir mahal.");
    let response = server.post("/api/reviews").multipart(form).await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["komentar"], "Pelayanan ****, parkir mahal.");
    assert_eq!(json["censored"], true);
    assert!(json["photos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_review_rejected_photo_stores_nothing() {
    let (state, dir) = common::create_test_state();
    let server = common::api_server(state);

    let form = MultipartForm::new()
        .add_text("rating", "4")
        .add_text("komentar", "Bagus")
        .add_part("foto", common::photo("ok.png", common::PNG))
        .add_part("foto", common::photo("evil.gif", common::PHP));
    let response = server.post("/api/reviews").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["filename"],
        "evil.gif"
    );
    assert!(common::stored_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_review_invalid_rating() {
    let (state, _dir) = common::create_test_state();
    let server = common::api_server(state);

    for rating in ["0", "6", "lima", ""] {
        let form = MultipartForm::new()
            .add_text("rating", rating)
            .add_text("komentar", "Bagus");
        let response = server.post("/api/reviews").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"]["code"],
            "validation_error",
            "rating {rating:?}"
        );
    }
}

#[tokio::test]
async fn test_review_requires_comment() {
    let (state, dir) = common::create_test_state();
    let server = common::api_server(state);

    let form = MultipartForm::new()
        .add_text("rating", "3")
        .add_text("komentar", "   ")
        .add_part("foto", common::photo("ok.png", common::PNG));
    let response = server.post("/api/reviews").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(
        response.json::<Value>()["error"]["details"]
            .get("komentar")
            .is_some()
    );
    assert!(common::stored_files(dir.path()).is_empty());
}
