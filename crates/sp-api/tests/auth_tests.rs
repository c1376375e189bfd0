use axum::http::StatusCode;
use serde_json::json;
use sp_api::router;

use crate::common::{TestClient, TestStateBuilder};

#[tokio::test]
async fn test_signup_invalid_email_rejected() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let body = json!({
        "name": "New User",
        "email": "invalid-email",
        "password": "SecureP4ssword"
    });

    let response = client.post_json("/auth/signup", &body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_signup_weak_password_rejected() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let body = json!({
        "name": "New User",
        "email": "newuser@example.com",
        "password": "weak"
    });

    let response = client.post_json("/auth/signup", &body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("password"));
}

#[tokio::test]
async fn test_signup_empty_name_rejected() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let body = json!({
        "name": "   ",
        "email": "newuser@example.com",
        "password": "SecureP4ssword"
    });

    let response = client.post_json("/auth/signup", &body).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn test_me_without_token_rejected() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client.get("/auth/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token_rejected() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client.get_with_token("/auth/me", "not.a.token").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_wrong_secret_token_rejected() {
    let builder = TestStateBuilder::new();
    let state = builder.build().expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    // Signed with a different secret than the server's
    let forged = sp_api::auth::jwt::generate_jwt_token(
        uuid::Uuid::new_v4(),
        "attacker@example.com".to_string(),
        "wrong_jwt_secret_minimum_32_characters_long",
        24,
    )
    .expect("Failed to generate token");

    let response = client.get_with_token("/auth/me", &forged).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
