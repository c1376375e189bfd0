use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::BookmarkedTopic;

/// Add a bookmark. Set semantics: adding an existing bookmark is a no-op.
pub async fn add<'e, E>(executor: E, user_id: Uuid, topic_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO bookmarks (user_id, topic_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, topic_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Remove a bookmark. Removing an absent bookmark is a no-op.
pub async fn remove<'e, E>(executor: E, user_id: Uuid, topic_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM bookmarks
            WHERE user_id = $1 AND topic_id = $2
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn exists<'e, E>(executor: E, user_id: Uuid, topic_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(
                SELECT 1 FROM bookmarks
                WHERE user_id = $1 AND topic_id = $2
            )
        "#,
    )
    .bind(user_id)
    .bind(topic_id)
    .fetch_one(executor)
    .await
}

/// The user's bookmarked topics. No ordering guarantee.
pub async fn list<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<BookmarkedTopic>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT t.id AS topic_id, t.unit_id, t.subject_id, t.title
            FROM bookmarks b
            JOIN topics t ON t.id = b.topic_id
            WHERE b.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
