use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use sp_db::{
    models::BookmarkedTopic,
    repositories::{bookmark, catalog},
};

use crate::{ApiState, auth::AuthUser, error::ApiError, validation};

/// Create the bookmark routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics/{topic_id}/bookmark", post(toggle_bookmark))
        .route("/bookmarks", get(list_bookmarks))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BookmarkAction {
    Add,
    Remove,
}

#[derive(Debug, Deserialize)]
struct BookmarkRequest {
    action: BookmarkAction,
}

#[derive(Debug, Serialize)]
struct BookmarkResponse {
    is_bookmarked: bool,
}

/// Add or remove a bookmark. Set semantics: a duplicate add and a remove of
/// an absent bookmark are both no-ops.
async fn toggle_bookmark(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(topic_id): Path<String>,
    Json(payload): Json<BookmarkRequest>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    let topic_id = validation::parse_id(&topic_id)?;

    match payload.action {
        BookmarkAction::Add => {
            // Bookmarks may only reference topics the catalog knows about
            if !catalog::topic_exists(&state.pool, topic_id).await? {
                return Err(ApiError::NotFound("topic"));
            }
            bookmark::add(&state.pool, auth_user.user_id, topic_id).await?;
            Ok(Json(BookmarkResponse {
                is_bookmarked: true,
            }))
        }
        BookmarkAction::Remove => {
            bookmark::remove(&state.pool, auth_user.user_id, topic_id).await?;
            Ok(Json(BookmarkResponse {
                is_bookmarked: false,
            }))
        }
    }
}

async fn list_bookmarks(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<BookmarkedTopic>>, ApiError> {
    let bookmarks = bookmark::list(&state.pool, auth_user.user_id).await?;
    Ok(Json(bookmarks))
}
