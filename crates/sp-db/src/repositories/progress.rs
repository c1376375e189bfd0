use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Lazily create the progress entry for (user, subject) at 0%.
pub async fn ensure_entry<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO subject_progress (user_id, subject_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, subject_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn completed_topic_ids<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT topic_id FROM completed_topics
            WHERE user_id = $1 AND subject_id = $2
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .fetch_all(executor)
    .await
}

pub async fn completed_unit_ids<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT unit_id FROM completed_units
            WHERE user_id = $1 AND subject_id = $2
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .fetch_all(executor)
    .await
}

pub async fn topic_completed<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(
                SELECT 1 FROM completed_topics
                WHERE user_id = $1 AND topic_id = $2
            )
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .fetch_one(executor)
    .await
}

pub async fn insert_completed_topic<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
    subject_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO completed_topics (user_id, topic_id, subject_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, topic_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .bind(subject_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn delete_completed_topic<'e, E>(
    executor: E,
    user_id: Uuid,
    topic_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM completed_topics
            WHERE user_id = $1 AND topic_id = $2
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_completed_unit<'e, E>(
    executor: E,
    user_id: Uuid,
    unit_id: Uuid,
    subject_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO completed_units (user_id, unit_id, subject_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, unit_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(unit_id)
    .bind(subject_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn delete_completed_unit<'e, E>(
    executor: E,
    user_id: Uuid,
    unit_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM completed_units
            WHERE user_id = $1 AND unit_id = $2
        "#,
    )
    .bind(user_id)
    .bind(unit_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Persist a freshly recomputed percentage.
pub async fn set_percentage<'e, E>(
    executor: E,
    user_id: Uuid,
    subject_id: Uuid,
    percentage: i32,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE subject_progress
            SET progress_percentage = $3, updated_at = NOW()
            WHERE user_id = $1 AND subject_id = $2
        "#,
    )
    .bind(user_id)
    .bind(subject_id)
    .bind(percentage)
    .execute(executor)
    .await?;
    Ok(())
}
