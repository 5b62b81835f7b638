/**
 * Router Configuration
 *
 * Combines the route groups into one router and installs the middleware
 * chain. Layers run in this order for every request, outermost first:
 *
 * 1. Panic recovery (500 with `Connection: close`)
 * 2. Request tracing
 * 3. Security response headers
 * 4. Session loading and saving
 * 5. CSRF verification of POST, PUT, PATCH and DELETE
 * 6. Resolving the session user (`authenticate`)
 * 7. The login gate, on protected routes only
 * 8. The handler
 *
 * A request rejected by a layer never reaches the layers below it.
 */

use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::backend::auth::sessions::session_layer;
use crate::backend::error::AppError;
use crate::backend::middleware::{authenticate, csrf_guard, SecureHeaders};
use crate::backend::routes::site_routes::configure_site_routes;
use crate::backend::routes::snippet_routes::configure_snippet_routes;
use crate::backend::routes::user_routes::configure_user_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes and middleware configured.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_site_routes(Router::new());
    let router = configure_user_routes(router);
    let router = configure_snippet_routes(router);

    router
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(app_state.clone(), authenticate))
        .layer(middleware::from_fn(csrf_guard))
        .layer(session_layer(
            &app_state.config,
            SqliteStore::new(app_state.db_pool.clone()),
        ))
        .with_secure_headers()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(app_state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
