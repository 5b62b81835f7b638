/**
 * Application State Management
 *
 * `AppState` is the central state container shared by every handler:
 * - the SQLite connection pool (users and snippets)
 * - the loaded configuration
 *
 * The session store is deliberately not part of `AppState`: it is owned by
 * the session layer and reaches handlers through request extensions.
 *
 * The `FromRef` implementations allow handlers and middleware to extract
 * only the part of the state they need.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::server::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
