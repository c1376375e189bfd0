use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Subject, SubjectCategory, Topic, TopicExample, Unit};

pub async fn list_subjects<'e, E>(
    executor: E,
    category: Option<SubjectCategory>,
    search: Option<&str>,
) -> Result<Vec<Subject>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, image_url, category, created_at, updated_at
            FROM subjects
            WHERE ($1::subject_category IS NULL OR category = $1)
              AND ($2::text IS NULL
                   OR title ILIKE '%' || $2 || '%'
                   OR description ILIKE '%' || $2 || '%')
            ORDER BY created_at
        "#,
    )
    .bind(category)
    .bind(search)
    .fetch_all(executor)
    .await
}

pub async fn find_subject<'e, E>(executor: E, subject_id: Uuid) -> Result<Option<Subject>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, title, description, image_url, category, created_at, updated_at
            FROM subjects
            WHERE id = $1
        "#,
    )
    .bind(subject_id)
    .fetch_optional(executor)
    .await
}

/// Units of a subject, ascending by their explicit position.
pub async fn list_units<'e, E>(executor: E, subject_id: Uuid) -> Result<Vec<Unit>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, title, description, position, created_at, updated_at
            FROM units
            WHERE subject_id = $1
            ORDER BY position
        "#,
    )
    .bind(subject_id)
    .fetch_all(executor)
    .await
}

pub async fn find_unit<'e, E>(executor: E, unit_id: Uuid) -> Result<Option<Unit>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, subject_id, title, description, position, created_at, updated_at
            FROM units
            WHERE id = $1
        "#,
    )
    .bind(unit_id)
    .fetch_optional(executor)
    .await
}

/// Topics of a unit, ascending by their explicit position.
pub async fn list_topics<'e, E>(executor: E, unit_id: Uuid) -> Result<Vec<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, unit_id, subject_id, title, content, position, created_at, updated_at
            FROM topics
            WHERE unit_id = $1
            ORDER BY position
        "#,
    )
    .bind(unit_id)
    .fetch_all(executor)
    .await
}

pub async fn find_topic<'e, E>(executor: E, topic_id: Uuid) -> Result<Option<Topic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, unit_id, subject_id, title, content, position, created_at, updated_at
            FROM topics
            WHERE id = $1
        "#,
    )
    .bind(topic_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_examples<'e, E>(
    executor: E,
    topic_id: Uuid,
) -> Result<Vec<TopicExample>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, topic_id, title, description, code, language, position
            FROM topic_examples
            WHERE topic_id = $1
            ORDER BY position
        "#,
    )
    .bind(topic_id)
    .fetch_all(executor)
    .await
}

pub async fn subject_title<'e, E>(executor: E, subject_id: Uuid) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT title FROM subjects WHERE id = $1
        "#,
    )
    .bind(subject_id)
    .fetch_optional(executor)
    .await
}

pub async fn unit_title<'e, E>(executor: E, unit_id: Uuid) -> Result<Option<String>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT title FROM units WHERE id = $1
        "#,
    )
    .bind(unit_id)
    .fetch_optional(executor)
    .await
}

/// The live topic total for a subject; the progress percentage denominator.
pub async fn count_topics_in_subject<'e, E>(
    executor: E,
    subject_id: Uuid,
) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COUNT(*) FROM topics WHERE subject_id = $1
        "#,
    )
    .bind(subject_id)
    .fetch_one(executor)
    .await
}

/// All topic ids of a unit; input to the unit-completion derivation.
pub async fn topic_ids_in_unit<'e, E>(executor: E, unit_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM topics WHERE unit_id = $1
        "#,
    )
    .bind(unit_id)
    .fetch_all(executor)
    .await
}

pub async fn topic_exists<'e, E>(executor: E, topic_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM topics WHERE id = $1)
        "#,
    )
    .bind(topic_id)
    .fetch_one(executor)
    .await
}
