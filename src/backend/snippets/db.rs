/**
 * Snippet Database Operations
 *
 * Snippets are immutable once inserted. A snippet whose expiry has passed is
 * indistinguishable from one that never existed: lookups report
 * `AppError::NotFound` for both.
 */

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::backend::error::{AppError, AppResult};
use crate::backend::snippets::types::Snippet;

pub async fn insert_snippet(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    expires_days: i64,
) -> AppResult<i64> {
    let created = Utc::now();
    let expires = created + Duration::days(expires_days);

    let result = sqlx::query(
        r#"
        INSERT INTO snippets (title, content, created, expires)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(created)
    .bind(expires)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_snippet(pool: &SqlitePool, id: i64) -> AppResult<Snippet> {
    let snippet = sqlx::query_as::<_, Snippet>(
        r#"
        SELECT id, title, content, created, expires
        FROM snippets
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match snippet {
        Some(snippet) if !snippet.is_expired(Utc::now()) => Ok(snippet),
        _ => Err(AppError::NotFound),
    }
}

/// The most recently created snippets that have not yet expired.
pub async fn latest_snippets(pool: &SqlitePool, limit: i64) -> AppResult<Vec<Snippet>> {
    let snippets = sqlx::query_as::<_, Snippet>(
        r#"
        SELECT id, title, content, created, expires
        FROM snippets
        WHERE expires > ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(Utc::now())
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(snippets)
}
