use axum::http::StatusCode;
use serde_json::json;
use sp_api::{auth::jwt, router};
use uuid::Uuid;

use crate::common::{TestClient, TestStateBuilder};

fn valid_token(builder: &TestStateBuilder) -> String {
    jwt::generate_jwt_token(
        Uuid::new_v4(),
        "user@example.com".to_string(),
        builder.jwt_secret(),
        24,
    )
    .expect("Failed to generate token")
}

#[tokio::test]
async fn test_quiz_submit_requires_authentication() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let body = json!({
        "subject_id": Uuid::new_v4(),
        "answers": {}
    });

    let response = client
        .post_json(&format!("/quiz/{}/submit", Uuid::new_v4()), &body)
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_completion_rejects_malformed_topic_id() {
    let builder = TestStateBuilder::new();
    let token = valid_token(&builder);
    let state = builder.build().expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client
        .post_json_with_token(
            "/topics/not-a-uuid/complete",
            &token,
            &json!({ "completed": true }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bookmark_rejects_malformed_topic_id() {
    let builder = TestStateBuilder::new();
    let token = valid_token(&builder);
    let state = builder.build().expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client
        .post_json_with_token(
            "/topics/not-a-uuid/bookmark",
            &token,
            &json!({ "action": "add" }),
        )
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_requires_authentication() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client
        .get(&format!("/topics/{}/status", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_requires_authentication() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client.get("/users/profile").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_seed_requires_authentication() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client
        .post_json("/admin/seed", &json!({ "subjects": [] }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
