/**
 * Site Routes
 *
 * - `GET /` - latest snippets
 * - `GET /about` - static about page
 * - `GET /ping` - liveness check, always `OK`
 */

use axum::{response::Response, routing::get, Router};

use crate::backend::auth::sessions::AppSession;
use crate::backend::error::AppResult;
use crate::backend::middleware::auth::CurrentUser;
use crate::backend::server::state::AppState;
use crate::backend::snippets::handlers::home;
use crate::backend::views::{render, Page, View};

pub fn configure_site_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(home))
        .route("/about", get(about))
        .route("/ping", get(ping))
}

async fn about(session: AppSession, user: CurrentUser) -> AppResult<Response> {
    let page = Page::load(&session, &user).await?;
    Ok(render(&page, &View::About))
}

async fn ping() -> &'static str {
    "OK"
}
