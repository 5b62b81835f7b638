/**
 * Session Store Adapter
 *
 * Server-side sessions are kept in an opaque key-value store owned by the
 * `tower-sessions` layer. The layer loads the session named by the request
 * cookie before the handler runs and saves it (setting the cookie) after the
 * handler returns, so every write is flushed as the last step of a request.
 *
 * `AppSession` is the only code that reads or writes session values. It
 * defines the typed keys the application relies on:
 *
 * - `authenticated_user_id` - set by login, cleared by logout
 * - `csrf_token` - the anti-forgery token bound to this session
 * - `flash` - a one-time message shown on the next rendered page
 * - `redirect_after_login` - where to go once the user has logged in
 *
 * # Guarantees
 *
 * - read-your-writes: a `get` after `put` in the same request observes the
 *   written value
 * - after `destroy`, every `get` returns `None`
 * - sessions expire after a period of inactivity (12 hours by default)
 *
 * Sessions live in the application's SQLite database. Expired records are
 * never loaded, and a background task deletes them periodically.
 */

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{de::DeserializeOwned, Serialize};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tower_sessions::{ExpiredDeletion, Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use uuid::Uuid;

use crate::backend::error::{AppError, AppResult};
use crate::backend::server::config::Config;

pub const SESSION_COOKIE_NAME: &str = "snippetbox_session";

pub const USER_ID_KEY: &str = "authenticated_user_id";
pub const CSRF_TOKEN_KEY: &str = "csrf_token";
pub const FLASH_KEY: &str = "flash";
pub const REDIRECT_AFTER_LOGIN_KEY: &str = "redirect_after_login";

/// How often expired session records are swept from the store.
pub const EXPIRED_SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Build the session layer over `store` with inactivity expiry.
pub fn session_layer(config: &Config, store: SqliteStore) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(config.session_lifetime))
        .with_always_save(true)
}

/// Delete expired session records every `period` until the task is aborted.
pub fn spawn_expired_session_cleanup(store: SqliteStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = store.continuously_delete_expired(period).await {
            tracing::error!("Expired session cleanup stopped: {}", e);
        }
    })
}

/// Typed access to the current request's session.
#[derive(Clone, Debug)]
pub struct AppSession(Session);

impl AppSession {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        Ok(self.0.get(key).await?)
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: T) -> AppResult<()> {
        self.0.insert(key, value).await?;
        Ok(())
    }

    pub async fn remove(&self, key: &str) -> AppResult<()> {
        self.0.remove_value(key).await?;
        Ok(())
    }

    /// Drop every value and delete the session from the store.
    pub async fn destroy(&self) -> AppResult<()> {
        self.0.flush().await?;
        Ok(())
    }

    /// Move the session data to a fresh id; the old id is deleted from the
    /// store and can no longer be presented.
    pub async fn renew(&self) -> AppResult<()> {
        self.0.cycle_id().await?;
        Ok(())
    }

    pub async fn user_id(&self) -> AppResult<Option<Uuid>> {
        self.get(USER_ID_KEY).await
    }

    pub async fn set_user_id(&self, user_id: Uuid) -> AppResult<()> {
        self.put(USER_ID_KEY, user_id).await
    }

    pub async fn clear_user_id(&self) -> AppResult<()> {
        self.remove(USER_ID_KEY).await
    }

    pub async fn csrf_token(&self) -> AppResult<Option<String>> {
        self.get(CSRF_TOKEN_KEY).await
    }

    pub async fn set_csrf_token(&self, token: &str) -> AppResult<()> {
        self.put(CSRF_TOKEN_KEY, token).await
    }

    pub async fn put_flash(&self, message: &str) -> AppResult<()> {
        self.put(FLASH_KEY, message).await
    }

    /// Read the flash message and clear it, so it is shown only once.
    pub async fn pop_flash(&self) -> AppResult<Option<String>> {
        Ok(self.0.remove(FLASH_KEY).await?)
    }

    pub async fn set_redirect_after_login(&self, path: &str) -> AppResult<()> {
        self.put(REDIRECT_AFTER_LOGIN_KEY, path).await
    }

    pub async fn take_redirect_after_login(&self) -> AppResult<Option<String>> {
        Ok(self.0.remove(REDIRECT_AFTER_LOGIN_KEY).await?)
    }
}

impl<S> FromRequestParts<S> for AppSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(AppSession)
            .ok_or_else(|| {
                tracing::error!("Session layer is not installed for this route");
                AppError::internal("session layer missing")
            })
    }
}

#[cfg(test)]
pub(crate) fn test_session() -> AppSession {
    use std::sync::Arc;
    use tower_sessions::MemoryStore;
    AppSession::new(Session::new(None, Arc::new(MemoryStore::default()), None))
}
