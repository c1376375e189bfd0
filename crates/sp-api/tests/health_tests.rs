use axum::http::StatusCode;
use sp_api::router;

use crate::common::{TestClient, TestStateBuilder};

#[tokio::test]
async fn test_health_endpoint() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client.get("/health").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_404() {
    let state = TestStateBuilder::new()
        .build()
        .expect("Failed to create test state");

    let app = router::router().with_state(state);
    let client = TestClient::new(app);

    let response = client.get("/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);
}
