//! Contest sign-up, logs and leaderboards over HTTP

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

fn close(actual: &serde_json::Value, expected: f64) -> bool {
    (actual.as_f64().unwrap() - expected).abs() < 1e-4
}

#[tokio::test]
async fn test_contest_flow() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let contest_id = app.running_contest(&admin).await;
    let token = app.register_and_login("foo@bar.com", "John Doe").await;

    // Sign up
    let (status, _) = app
        .post("/rankings", None, json!({ "contest_id": contest_id, "languages": ["jpn"] }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/rankings",
            Some(&token),
            json!({ "contest_id": contest_id, "languages": ["jpn", "kor"] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/rankings/current", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contest_id"], contest_id);
    let languages = body["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 3);
    assert!(languages.contains(&json!("GLO")));

    // Log some reading
    let (status, book) = app
        .post(
            "/contest_logs",
            Some(&token),
            json!({
                "contest_id": contest_id,
                "language_code": "jpn",
                "medium_id": 1,
                "amount": 10,
                "description": "Shiki",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(close(&book["adjusted_amount"], 10.0));

    let (status, _) = app
        .post(
            "/contest_logs",
            Some(&token),
            json!({ "contest_id": contest_id, "language_code": "kor", "medium_id": 2, "amount": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/contest_logs",
            Some(&token),
            json!({ "contest_id": contest_id, "language_code": "ger", "medium_id": 1, "amount": 10 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "LANGUAGE_NOT_SIGNED_UP");

    // Global leaderboard sums every language
    let (status, body) = app.get(&format!("/rankings?contest_id={}", contest_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["user_display_name"], "John Doe");
    assert!(close(&body[0]["amount"], 12.0));

    let (status, body) = app
        .get(&format!("/rankings?contest_id={}&language_code=kor", contest_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(close(&body[0]["amount"], 2.0));

    // Edit and delete
    let book_id = book["id"].as_i64().unwrap();
    let (status, body) = app
        .put(
            &format!("/contest_logs/{}", book_id),
            Some(&token),
            json!({ "language_code": "jpn", "medium_id": 1, "amount": 20 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contest_id"], contest_id);

    let user_id = book["user_id"].as_i64().unwrap();
    let (status, body) = app
        .get(
            &format!("/rankings/registration?contest_id={}&user_id={}", contest_id, user_id),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let global = body
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["language_code"] == "GLO")
        .unwrap();
    assert!(close(&global["amount"], 22.0));

    let (status, _) = app
        .delete(&format!("/contest_logs/{}", book_id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .get(
            &format!("/contest_logs?contest_id={}&user_id={}", contest_id, user_id),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["language_code"], "kor");
}

#[tokio::test]
async fn test_logs_belong_to_their_author() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let contest_id = app.running_contest(&admin).await;

    let author = app.register_and_login("foo@bar.com", "John Doe").await;
    let other = app.register_and_login("bar@bar.com", "Jane Doe").await;
    for token in [&author, &other] {
        let (status, _) = app
            .post(
                "/rankings",
                Some(token),
                json!({ "contest_id": contest_id, "languages": ["jpn"] }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, log) = app
        .post(
            "/contest_logs",
            Some(&author),
            json!({ "contest_id": contest_id, "language_code": "jpn", "medium_id": 1, "amount": 5 }),
        )
        .await;
    let uri = format!("/contest_logs/{}", log["id"]);

    let (status, _) = app.delete(&uri, Some(&other)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .put(&uri, Some(&other), json!({ "language_code": "jpn", "medium_id": 1, "amount": 500 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_no_open_contest() {
    let app = TestApp::new();
    let token = app.register_and_login("foo@bar.com", "John Doe").await;

    let (status, _) = app.get("/rankings/current", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post("/rankings", Some(&token), json!({ "contest_id": 42, "languages": ["jpn"] }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_up_for_closed_contest() {
    let app = TestApp::new();
    let admin = app.admin_token().await;
    let token = app.register_and_login("foo@bar.com", "John Doe").await;

    let (_, contest) = app
        .post(
            "/contests",
            Some(&admin),
            json!({ "description": "Closed", "start": "2019-01-01T00:00:00Z", "end": "2019-01-31T00:00:00Z" }),
        )
        .await;

    let (status, body) = app
        .post(
            "/rankings",
            Some(&token),
            json!({ "contest_id": contest["id"], "languages": ["jpn"] }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONTEST_IS_CLOSED");
}
