use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::json;

use sp_db::{
    models::{SubjectCategory, UserRole},
    repositories::{seed, user as user_repo},
};

use crate::{ApiState, auth::AuthUser, error::ApiError, validation};

/// Create the admin routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/admin/seed", post(seed_catalog))
        .route("/admin/promote", post(promote_user))
}

#[derive(Debug, Deserialize)]
struct SeedCatalog {
    subjects: Vec<SeedSubject>,
}

#[derive(Debug, Deserialize)]
struct SeedSubject {
    title: String,
    description: String,
    image_url: String,
    category: SubjectCategory,
    #[serde(default)]
    units: Vec<SeedUnit>,
}

#[derive(Debug, Deserialize)]
struct SeedUnit {
    title: String,
    description: String,
    position: i32,
    #[serde(default)]
    topics: Vec<SeedTopic>,
    quiz: Option<SeedQuiz>,
}

#[derive(Debug, Deserialize)]
struct SeedTopic {
    title: String,
    content: String,
    position: i32,
    #[serde(default)]
    examples: Vec<SeedExample>,
}

#[derive(Debug, Deserialize)]
struct SeedExample {
    title: String,
    description: String,
    code: String,
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    "javascript".to_string()
}

#[derive(Debug, Deserialize)]
struct SeedQuiz {
    title: String,
    #[serde(default = "default_time_limit")]
    time_limit_minutes: i32,
    questions: Vec<SeedQuestion>,
}

fn default_time_limit() -> i32 {
    30
}

#[derive(Debug, Deserialize)]
struct SeedQuestion {
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromoteRequest {
    email: String,
}

async fn require_admin(state: &ApiState, auth_user: &AuthUser) -> Result<(), ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;
    if user.role != UserRole::Admin {
        return Err(ApiError::Forbidden(
            "administrator role required".to_string(),
        ));
    }
    Ok(())
}

fn validate_catalog(catalog: &SeedCatalog) -> Result<(), ApiError> {
    for subject in &catalog.subjects {
        validation::validate_title(&subject.title)?;
        for unit in &subject.units {
            validation::validate_title(&unit.title)?;
            for topic in &unit.topics {
                validation::validate_title(&topic.title)?;
            }
            let Some(quiz) = &unit.quiz else { continue };
            validation::validate_title(&quiz.title)?;
            for question in &quiz.questions {
                if question.options.is_empty() || question.options.len() > 4 {
                    return Err(ApiError::Validation(format!(
                        "question '{}' must have between 1 and 4 options",
                        question.prompt
                    )));
                }
                if question.correct_answer >= question.options.len() {
                    return Err(ApiError::Validation(format!(
                        "question '{}' marks option {} correct but has only {} options",
                        question.prompt,
                        question.correct_answer,
                        question.options.len()
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Bulk reseed: wipe the content tables and insert the posted catalog.
///
/// The only write path for content. Validation happens before the wipe so a
/// bad payload cannot leave the catalog empty; everything runs in one
/// transaction.
async fn seed_catalog(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<SeedCatalog>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &auth_user).await?;
    validate_catalog(&payload)?;

    let mut tx = state.pool.begin().await?;

    seed::wipe_content(&mut *tx).await?;

    let mut subjects = 0usize;
    let mut units = 0usize;
    let mut topics = 0usize;
    let mut quizzes = 0usize;

    for subject in &payload.subjects {
        let subject_id = seed::insert_subject(
            &mut *tx,
            subject.title.trim(),
            &subject.description,
            &subject.image_url,
            subject.category,
        )
        .await?;
        subjects += 1;

        for unit in &subject.units {
            let unit_id = seed::insert_unit(
                &mut *tx,
                subject_id,
                unit.title.trim(),
                &unit.description,
                unit.position,
            )
            .await?;
            units += 1;

            for topic in &unit.topics {
                let topic_id = seed::insert_topic(
                    &mut *tx,
                    unit_id,
                    subject_id,
                    topic.title.trim(),
                    &topic.content,
                    topic.position,
                )
                .await?;
                topics += 1;

                for (position, example) in topic.examples.iter().enumerate() {
                    seed::insert_example(
                        &mut *tx,
                        topic_id,
                        &example.title,
                        &example.description,
                        &example.code,
                        &example.language,
                        position as i32,
                    )
                    .await?;
                }
            }

            if let Some(quiz) = &unit.quiz {
                let quiz_id = seed::insert_quiz(
                    &mut *tx,
                    unit_id,
                    subject_id,
                    quiz.title.trim(),
                    quiz.time_limit_minutes,
                )
                .await?;
                quizzes += 1;

                for (position, question) in quiz.questions.iter().enumerate() {
                    seed::insert_question(
                        &mut *tx,
                        quiz_id,
                        &question.prompt,
                        &question.options,
                        question.correct_answer as i32,
                        question.explanation.as_deref(),
                        position as i32,
                    )
                    .await?;
                }
            }
        }
    }

    tx.commit().await?;

    tracing::info!(subjects, units, topics, quizzes, "catalog reseeded");

    Ok(Json(json!({
        "message": "Catalog seeded successfully",
        "subjects": subjects,
        "units": units,
        "topics": topics,
        "quizzes": quizzes,
    })))
}

async fn promote_user(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<PromoteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &auth_user).await?;

    let email = payload.email.to_lowercase();
    let affected = user_repo::promote_to_admin(&state.pool, &email).await?;
    if affected == 0 {
        return Err(ApiError::NotFound("user"));
    }

    tracing::info!(%email, "user promoted to admin");

    Ok(Json(json!({ "message": "User promoted to admin" })))
}
