use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Quiz, QuizQuestion, QuizResult};

/// The quiz of a unit, if any. Lookup is by unit: the schema enforces at most
/// one quiz per unit.
pub async fn find_by_unit<'e, E>(executor: E, unit_id: Uuid) -> Result<Option<Quiz>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, unit_id, subject_id, title, time_limit_minutes, created_at, updated_at
            FROM quizzes
            WHERE unit_id = $1
        "#,
    )
    .bind(unit_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_questions<'e, E>(
    executor: E,
    quiz_id: Uuid,
) -> Result<Vec<QuizQuestion>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, quiz_id, prompt, options, correct_answer, explanation, position
            FROM quiz_questions
            WHERE quiz_id = $1
            ORDER BY position
        "#,
    )
    .bind(quiz_id)
    .fetch_all(executor)
    .await
}

/// Store the latest result for (user, quiz); re-taking overwrites.
pub async fn upsert_result<'e, E>(
    executor: E,
    user_id: Uuid,
    quiz_id: Uuid,
    score: i32,
    correct_count: i32,
    total_questions: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO quiz_results (user_id, quiz_id, score, correct_count, total_questions)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, quiz_id)
            DO UPDATE SET
                score = $3,
                correct_count = $4,
                total_questions = $5,
                taken_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .bind(score)
    .bind(correct_count)
    .bind(total_questions)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn find_result<'e, E>(
    executor: E,
    user_id: Uuid,
    quiz_id: Uuid,
) -> Result<Option<QuizResult>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, quiz_id, score, correct_count, total_questions, taken_at
            FROM quiz_results
            WHERE user_id = $1 AND quiz_id = $2
        "#,
    )
    .bind(user_id)
    .bind(quiz_id)
    .fetch_optional(executor)
    .await
}
