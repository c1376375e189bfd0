use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sp_db::{
    models::{BookmarkedTopic, UserRole, UserTheme},
    repositories::{bookmark, user as user_repo},
};

use crate::{ApiState, auth::AuthUser, error::ApiError, middleware::rate_limit};

/// Create the user routes
pub fn routes() -> Router<ApiState> {
    rate_limit::apply_general_rate_limit(
        Router::new()
            .route("/users/profile", get(get_profile))
            .route("/users/theme", put(update_theme)),
    )
}

#[derive(Debug, Serialize)]
struct SubjectProgressView {
    subject_id: Uuid,
    subject_title: String,
    completed_topics: i64,
    completed_units: i64,
    total_topics: i64,
    progress_percentage: u8,
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    id: Uuid,
    name: String,
    email: String,
    role: UserRole,
    theme: UserTheme,
    progress: Vec<SubjectProgressView>,
    bookmarks: Vec<BookmarkedTopic>,
}

#[derive(Debug, Deserialize)]
struct ThemeRequest {
    theme: UserTheme,
}

async fn get_profile(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    let summaries = user_repo::progress_summaries(&state.pool, auth_user.user_id).await?;
    let progress = summaries
        .into_iter()
        .map(|s| SubjectProgressView {
            subject_id: s.subject_id,
            subject_title: s.subject_title,
            completed_topics: s.completed_topics,
            completed_units: s.completed_units,
            total_topics: s.total_topics,
            // Recomputed against the live topic total, not the stored value
            progress_percentage: sp_engine::percentage(
                s.completed_topics as usize,
                s.total_topics as usize,
            ),
        })
        .collect();

    let bookmarks = bookmark::list(&state.pool, auth_user.user_id).await?;

    Ok(Json(ProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        theme: user.theme,
        progress,
        bookmarks,
    }))
}

async fn update_theme(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<ThemeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user_repo::update_theme(&state.pool, auth_user.user_id, payload.theme).await?;

    Ok(Json(serde_json::json!({
        "message": "Theme updated successfully",
        "theme": payload.theme,
    })))
}
