use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{ProgressSummary, User, UserTheme};

pub async fn create<'e, E>(
    executor: E,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, email, password_hash, role, theme, created_at, updated_at
            FROM users
            WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, email, password_hash, role, theme, created_at, updated_at
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn email_exists<'e, E>(executor: E, email: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
        "#,
    )
    .bind(email)
    .fetch_one(executor)
    .await
}

pub async fn update_theme<'e, E>(
    executor: E,
    user_id: Uuid,
    theme: UserTheme,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET theme = $2, updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(theme)
    .execute(executor)
    .await?;
    Ok(())
}

/// Grant the admin role. Returns the number of affected rows (0 when no such
/// account exists).
pub async fn promote_to_admin<'e, E>(executor: E, email: &str) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET role = 'admin', updated_at = NOW()
            WHERE email = $1
        "#,
    )
    .bind(email)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Per-subject progress summaries for the profile page. The topic total is
/// taken from the catalog at query time, matching the percentage semantics.
pub async fn progress_summaries<'e, E>(
    executor: E,
    user_id: Uuid,
) -> Result<Vec<ProgressSummary>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                sp.subject_id,
                s.title AS subject_title,
                (SELECT COUNT(*) FROM completed_topics ct
                 WHERE ct.user_id = sp.user_id AND ct.subject_id = sp.subject_id) AS completed_topics,
                (SELECT COUNT(*) FROM completed_units cu
                 WHERE cu.user_id = sp.user_id AND cu.subject_id = sp.subject_id) AS completed_units,
                (SELECT COUNT(*) FROM topics t
                 WHERE t.subject_id = sp.subject_id) AS total_topics,
                sp.progress_percentage
            FROM subject_progress sp
            JOIN subjects s ON s.id = sp.subject_id
            WHERE sp.user_id = $1
            ORDER BY s.title
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
