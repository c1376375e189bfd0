use std::collections::HashSet;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use sp_engine::SubjectProgress;

use sp_db::repositories::{bookmark, catalog, progress as progress_repo};

use crate::{ApiState, auth::AuthUser, error::ApiError, validation};

/// Create the progress-tracking routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics/{topic_id}/complete", post(set_topic_completion))
        .route("/topics/{topic_id}/status", get(topic_status))
}

#[derive(Debug, Deserialize)]
struct CompletionRequest {
    completed: bool,
}

#[derive(Debug, Serialize)]
struct CompletionResponse {
    is_completed: bool,
    unit_completed: bool,
    progress_percentage: u8,
}

#[derive(Debug, Serialize)]
struct TopicStatus {
    is_bookmarked: bool,
    is_completed: bool,
}

/// Mark or unmark a topic as completed.
///
/// The owning unit and subject come from the catalog, not the client. The
/// set mutation, the unit-completion derivation and the percentage recompute
/// all happen inside one transaction so the progress entry is never observed
/// half-updated. Re-marking and re-unmarking are no-ops.
async fn set_topic_completion(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(topic_id): Path<String>,
    Json(payload): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let topic_id = validation::parse_id(&topic_id)?;

    let mut tx = state.pool.begin().await?;

    let topic = catalog::find_topic(&mut *tx, topic_id)
        .await?
        .ok_or_else(|| ApiError::UnknownReference(format!("topic {topic_id}")))?;

    progress_repo::ensure_entry(&mut *tx, auth_user.user_id, topic.subject_id).await?;

    // Rebuild the in-memory progress entry from the stored sets
    let mut progress = SubjectProgress::new(topic.subject_id);
    progress.completed_topics =
        progress_repo::completed_topic_ids(&mut *tx, auth_user.user_id, topic.subject_id)
            .await?
            .into_iter()
            .collect::<HashSet<_>>();
    progress.completed_units =
        progress_repo::completed_unit_ids(&mut *tx, auth_user.user_id, topic.subject_id)
            .await?
            .into_iter()
            .collect::<HashSet<_>>();

    let unit_topics = catalog::topic_ids_in_unit(&mut *tx, topic.unit_id).await?;

    if payload.completed {
        progress.mark_topic_complete(topic.unit_id, topic_id, &unit_topics);
        progress_repo::insert_completed_topic(&mut *tx, auth_user.user_id, topic_id, topic.subject_id)
            .await?;
        if progress.completed_units.contains(&topic.unit_id) {
            progress_repo::insert_completed_unit(
                &mut *tx,
                auth_user.user_id,
                topic.unit_id,
                topic.subject_id,
            )
            .await?;
        }
    } else {
        progress.unmark_topic_complete(topic.unit_id, topic_id);
        progress_repo::delete_completed_topic(&mut *tx, auth_user.user_id, topic_id).await?;
        progress_repo::delete_completed_unit(&mut *tx, auth_user.user_id, topic.unit_id).await?;
    }

    // Denominator comes from the catalog at this moment, not a cached total
    let total = catalog::count_topics_in_subject(&mut *tx, topic.subject_id).await?;
    progress.recompute(total as usize);
    progress_repo::set_percentage(
        &mut *tx,
        auth_user.user_id,
        topic.subject_id,
        i32::from(progress.percentage),
    )
    .await?;

    tx.commit().await?;

    Ok(Json(CompletionResponse {
        is_completed: payload.completed,
        unit_completed: progress.completed_units.contains(&topic.unit_id),
        progress_percentage: progress.percentage,
    }))
}

async fn topic_status(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(topic_id): Path<String>,
) -> Result<Json<TopicStatus>, ApiError> {
    let topic_id = validation::parse_id(&topic_id)?;

    if !catalog::topic_exists(&state.pool, topic_id).await? {
        return Err(ApiError::NotFound("topic"));
    }

    let is_bookmarked = bookmark::exists(&state.pool, auth_user.user_id, topic_id).await?;
    let is_completed = progress_repo::topic_completed(&state.pool, auth_user.user_id, topic_id).await?;

    Ok(Json(TopicStatus {
        is_bookmarked,
        is_completed,
    }))
}
