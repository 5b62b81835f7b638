/**
 * Snippet Routes
 *
 * - `GET /snippet/{id}` - view a snippet
 * - `GET|POST /snippet/create` - create a snippet (requires authentication)
 *
 * `/snippet/create` is a static segment and takes precedence over `{id}`.
 */

use axum::{middleware, routing::get, Router};

use crate::backend::middleware::auth::require_authentication;
use crate::backend::server::state::AppState;
use crate::backend::snippets::handlers::{create_snippet, create_snippet_form, show_snippet};

pub fn configure_snippet_routes(router: Router<AppState>) -> Router<AppState> {
    let protected = Router::new()
        .route("/snippet/create", get(create_snippet_form).post(create_snippet))
        .route_layer(middleware::from_fn(require_authentication));

    router
        .route("/snippet/{id}", get(show_snippet))
        .merge(protected)
}
