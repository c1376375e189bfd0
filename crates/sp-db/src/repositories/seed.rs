//! Bulk-reseed writes. Content is only ever created through these, inside a
//! single transaction driven by the admin seeding endpoint.

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::SubjectCategory;

/// Delete all content. Units, topics, examples, quizzes, questions, progress
/// sets and bookmarks go with their subjects via cascade; user accounts stay.
pub async fn wipe_content<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM subjects
        "#,
    )
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_subject<'e, E>(
    executor: E,
    title: &str,
    description: &str,
    image_url: &str,
    category: SubjectCategory,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO subjects (title, description, image_url, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(image_url)
    .bind(category)
    .fetch_one(executor)
    .await
}

pub async fn insert_unit<'e, E>(
    executor: E,
    subject_id: Uuid,
    title: &str,
    description: &str,
    position: i32,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO units (subject_id, title, description, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(subject_id)
    .bind(title)
    .bind(description)
    .bind(position)
    .fetch_one(executor)
    .await
}

pub async fn insert_topic<'e, E>(
    executor: E,
    unit_id: Uuid,
    subject_id: Uuid,
    title: &str,
    content: &str,
    position: i32,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO topics (unit_id, subject_id, title, content, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
        "#,
    )
    .bind(unit_id)
    .bind(subject_id)
    .bind(title)
    .bind(content)
    .bind(position)
    .fetch_one(executor)
    .await
}

pub async fn insert_example<'e, E>(
    executor: E,
    topic_id: Uuid,
    title: &str,
    description: &str,
    code: &str,
    language: &str,
    position: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO topic_examples (topic_id, title, description, code, language, position)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(topic_id)
    .bind(title)
    .bind(description)
    .bind(code)
    .bind(language)
    .bind(position)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_quiz<'e, E>(
    executor: E,
    unit_id: Uuid,
    subject_id: Uuid,
    title: &str,
    time_limit_minutes: i32,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO quizzes (unit_id, subject_id, title, time_limit_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#,
    )
    .bind(unit_id)
    .bind(subject_id)
    .bind(title)
    .bind(time_limit_minutes)
    .fetch_one(executor)
    .await
}

pub async fn insert_question<'e, E>(
    executor: E,
    quiz_id: Uuid,
    prompt: &str,
    options: &[String],
    correct_answer: i32,
    explanation: Option<&str>,
    position: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO quiz_questions (quiz_id, prompt, options, correct_answer, explanation, position)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(quiz_id)
    .bind(prompt)
    .bind(options)
    .bind(correct_answer)
    .bind(explanation)
    .bind(position)
    .execute(executor)
    .await?;
    Ok(())
}
