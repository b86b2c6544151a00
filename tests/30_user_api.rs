mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::TestApp;

#[tokio::test]
async fn user_details_describe_the_requester() {
    let app = TestApp::new();
    let (_, token) = app.login("alex").await;

    let (status, body) = app.get("/api/user", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "name": "alex", "username": "alex", "email": "alex@alex.com" })
    );
}

#[tokio::test]
async fn token_for_unknown_user_is_not_found() {
    let app = TestApp::new();
    let token = app.jwt.issue(Uuid::new_v4(), "ghost").unwrap();

    let (status, _) = app.get("/api/user", Some(&token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
