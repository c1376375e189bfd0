use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::{admin, auth, bookmark, catalog, progress, quiz, state::ApiState, user};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(catalog::routes())
        .merge(quiz::routes())
        .merge(progress::routes())
        .merge(bookmark::routes())
        .merge(user::routes())
        .merge(admin::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
