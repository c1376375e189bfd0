use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::{Deserialize, Serialize};
use sp_engine::QuizError;
use uuid::Uuid;

use sp_db::repositories::{catalog, progress as progress_repo, quiz as quiz_repo};

use crate::{ApiState, auth::AuthUser, error::ApiError, validation};

/// Create the quiz routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/quiz/{unit_id}/submit", post(submit_quiz))
}

#[derive(Debug, Deserialize)]
struct QuizSubmission {
    subject_id: Uuid,
    /// question id -> selected option index
    answers: HashMap<Uuid, usize>,
}

#[derive(Debug, Serialize)]
struct ReviewEntry {
    question_id: Uuid,
    prompt: String,
    selected: Option<usize>,
    correct_answer: usize,
    is_correct: bool,
    explanation: Option<String>,
}

#[derive(Debug, Serialize)]
struct QuizSubmitResponse {
    score: u8,
    correct_count: usize,
    total_questions: usize,
    progress_percentage: u8,
    review: Vec<ReviewEntry>,
}

/// Grade a submission server-side and store the result.
///
/// Answers are validated against the quiz before anything is written: an
/// unknown question id or an out-of-range option index rejects the whole
/// submission. Grading, the result upsert and the progress recompute run in
/// one transaction.
async fn submit_quiz(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(unit_id): Path<String>,
    Json(payload): Json<QuizSubmission>,
) -> Result<Json<QuizSubmitResponse>, ApiError> {
    let unit_id = validation::parse_id(&unit_id)?;

    let mut tx = state.pool.begin().await?;

    let quiz = quiz_repo::find_by_unit(&mut *tx, unit_id)
        .await?
        .ok_or(ApiError::NotFound("quiz"))?;

    if quiz.subject_id != payload.subject_id {
        return Err(ApiError::UnknownReference(format!(
            "subject {} does not own this quiz",
            payload.subject_id
        )));
    }

    let rows = quiz_repo::list_questions(&mut *tx, quiz.id).await?;
    if rows.is_empty() {
        return Err(ApiError::Quiz(QuizError::EmptyQuiz));
    }

    let questions: Vec<sp_engine::Question> = rows
        .iter()
        .map(|q| sp_engine::Question {
            id: q.id,
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            correct_answer: q.correct_answer as usize,
            explanation: q.explanation.clone(),
        })
        .collect();

    for (question_id, option_index) in &payload.answers {
        let question = questions
            .iter()
            .find(|q| q.id == *question_id)
            .ok_or_else(|| {
                ApiError::UnknownReference(format!("question {question_id} is not in this quiz"))
            })?;
        if *option_index >= question.options.len() {
            return Err(ApiError::Quiz(QuizError::InvalidOption {
                index: *option_index,
                available: question.options.len(),
            }));
        }
    }

    let report = sp_engine::grade(&questions, &payload.answers);

    quiz_repo::upsert_result(
        &mut *tx,
        auth_user.user_id,
        quiz.id,
        i32::from(report.score),
        report.correct_count as i32,
        report.total_questions as i32,
    )
    .await?;

    // Report the completion to the progress entry and refresh the aggregate
    progress_repo::ensure_entry(&mut *tx, auth_user.user_id, quiz.subject_id).await?;
    let completed =
        progress_repo::completed_topic_ids(&mut *tx, auth_user.user_id, quiz.subject_id).await?;
    let total = catalog::count_topics_in_subject(&mut *tx, quiz.subject_id).await?;
    let percentage = sp_engine::percentage(completed.len(), total as usize);
    progress_repo::set_percentage(
        &mut *tx,
        auth_user.user_id,
        quiz.subject_id,
        i32::from(percentage),
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %auth_user.user_id,
        quiz_id = %quiz.id,
        score = report.score,
        "quiz submitted"
    );

    let review = report
        .breakdown
        .iter()
        .zip(&rows)
        .map(|(outcome, row)| ReviewEntry {
            question_id: outcome.question_id,
            prompt: row.prompt.clone(),
            selected: outcome.selected,
            correct_answer: outcome.correct_answer,
            is_correct: outcome.is_correct,
            explanation: row.explanation.clone(),
        })
        .collect();

    Ok(Json(QuizSubmitResponse {
        score: report.score,
        correct_count: report.correct_count,
        total_questions: report.total_questions,
        progress_percentage: percentage,
        review,
    }))
}
