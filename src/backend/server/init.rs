/**
 * Server Initialization
 *
 * Builds the application from configuration:
 * 1. Open the database, run migrations and start sweeping expired sessions
 * 2. Create the application state
 * 3. Assemble the router and middleware chain
 */

use axum::Router;
use tower_sessions_sqlx_store::SqliteStore;

use crate::backend::auth::sessions::{spawn_expired_session_cleanup, EXPIRED_SESSION_SWEEP_PERIOD};
use crate::backend::error::AppError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, Config};
use crate::backend::server::state::AppState;

pub async fn create_app(config: Config) -> Result<Router<()>, AppError> {
    tracing::info!("Initializing snippetbox server");

    let db_pool = load_database(&config.database_url).await?;
    spawn_expired_session_cleanup(SqliteStore::new(db_pool.clone()), EXPIRED_SESSION_SWEEP_PERIOD);
    let app_state = AppState::new(db_pool, config);

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
