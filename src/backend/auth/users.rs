/**
 * User Model and Database Operations
 *
 * Users are created by signup and never modified afterwards. The email
 * address is unique (enforced by a unique index); a violation surfaces as
 * `AppError::DuplicateEmail` so callers can report it on the form.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created: DateTime<Utc>,
}

pub async fn insert_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    hashed_password: &str,
) -> AppResult<Uuid> {
    let id = Uuid::new_v4();

    let result = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, hashed_password, created)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .bind(Utc::now())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(id),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(AppError::DuplicateEmail)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, hashed_password, created
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, hashed_password, created
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> AppResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Check an email/password pair and return the matching user's id.
///
/// An unknown email and a wrong password both yield
/// `AppError::InvalidCredentials` after one bcrypt verification at
/// `bcrypt_cost`, so callers cannot tell them apart by result or by timing.
pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> AppResult<Uuid> {
    let Some(user) = get_user_by_email(pool, email).await? else {
        verify_password(password, &dummy_hash(bcrypt_cost)).await?;
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.hashed_password).await? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user.id)
}

/// Hash a password with bcrypt on the blocking thread pool.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// A well-formed bcrypt hash at `cost`, verified against for unknown emails.
fn dummy_hash(cost: u32) -> String {
    format!("$2b${:02}$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW", cost)
}

async fn verify_password(password: &str, hashed_password: &str) -> AppResult<bool> {
    let password = password.to_owned();
    let hashed_password = hashed_password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed_password))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {}", e)))?
        .map_err(AppError::from)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    crate::backend::server::config::load_database("sqlite::memory:")
        .await
        .expect("in-memory database")
}
