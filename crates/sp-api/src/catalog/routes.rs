use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use sp_db::{
    models::{Subject, SubjectCategory},
    repositories::{catalog, quiz},
};

use super::model::{QuizDetail, SubjectDetail, TopicDetail, UnitDetail, UnitWithTopics};
use crate::{ApiState, error::ApiError, validation};

/// Create the catalog routes. Purely a query surface: no side effects.
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/subjects", get(list_subjects))
        .route("/subjects/{subject_id}", get(get_subject))
        .route("/units/{unit_id}", get(get_unit))
        .route("/units/{unit_id}/quiz", get(get_unit_quiz))
        .route("/topics/{topic_id}", get(get_topic))
}

#[derive(Debug, Deserialize)]
struct SubjectsQuery {
    category: Option<String>,
    search: Option<String>,
}

async fn list_subjects(
    State(state): State<ApiState>,
    Query(query): Query<SubjectsQuery>,
) -> Result<Json<Vec<Subject>>, ApiError> {
    // "all" is the frontend's no-filter sentinel
    let category = match query.category.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<SubjectCategory>()
                .map_err(ApiError::Validation)?,
        ),
    };

    let subjects = catalog::list_subjects(&state.pool, category, query.search.as_deref()).await?;

    Ok(Json(subjects))
}

async fn get_subject(
    State(state): State<ApiState>,
    Path(subject_id): Path<String>,
) -> Result<Json<SubjectDetail>, ApiError> {
    let subject_id = validation::parse_id(&subject_id)?;

    let subject = catalog::find_subject(&state.pool, subject_id)
        .await?
        .ok_or(ApiError::NotFound("subject"))?;

    let units = catalog::list_units(&state.pool, subject_id).await?;
    let mut detailed = Vec::with_capacity(units.len());
    for unit in units {
        let topics = catalog::list_topics(&state.pool, unit.id).await?;
        detailed.push(UnitWithTopics { unit, topics });
    }

    Ok(Json(SubjectDetail {
        subject,
        units: detailed,
    }))
}

async fn get_unit(
    State(state): State<ApiState>,
    Path(unit_id): Path<String>,
) -> Result<Json<UnitDetail>, ApiError> {
    let unit_id = validation::parse_id(&unit_id)?;

    let unit = catalog::find_unit(&state.pool, unit_id)
        .await?
        .ok_or(ApiError::NotFound("unit"))?;

    let topics = catalog::list_topics(&state.pool, unit_id).await?;
    let subject_title = catalog::subject_title(&state.pool, unit.subject_id)
        .await?
        .ok_or(ApiError::NotFound("subject"))?;

    Ok(Json(UnitDetail {
        unit,
        subject_title,
        topics,
    }))
}

async fn get_unit_quiz(
    State(state): State<ApiState>,
    Path(unit_id): Path<String>,
) -> Result<Json<QuizDetail>, ApiError> {
    let unit_id = validation::parse_id(&unit_id)?;

    let quiz = quiz::find_by_unit(&state.pool, unit_id)
        .await?
        .ok_or(ApiError::NotFound("quiz"))?;

    let questions = quiz::list_questions(&state.pool, quiz.id).await?;

    Ok(Json(QuizDetail { quiz, questions }))
}

async fn get_topic(
    State(state): State<ApiState>,
    Path(topic_id): Path<String>,
) -> Result<Json<TopicDetail>, ApiError> {
    let topic_id = validation::parse_id(&topic_id)?;

    let topic = catalog::find_topic(&state.pool, topic_id)
        .await?
        .ok_or(ApiError::NotFound("topic"))?;

    let examples = catalog::list_examples(&state.pool, topic_id).await?;
    let unit_title = catalog::unit_title(&state.pool, topic.unit_id)
        .await?
        .ok_or(ApiError::NotFound("unit"))?;
    let subject_title = catalog::subject_title(&state.pool, topic.subject_id)
        .await?
        .ok_or(ApiError::NotFound("subject"))?;

    Ok(Json(TopicDetail {
        topic,
        examples,
        unit_title,
        subject_title,
    }))
}
