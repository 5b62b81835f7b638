/**
 * User Routes
 *
 * - `GET|POST /user/signup` - account creation
 * - `GET|POST /user/login` - login
 * - `POST /user/logout` - logout (requires authentication)
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{login, login_form, logout, signup, signup_form};
use crate::backend::middleware::auth::require_authentication;
use crate::backend::routes::LOGIN_PATH;
use crate::backend::server::state::AppState;

pub fn configure_user_routes(router: Router<AppState>) -> Router<AppState> {
    let protected = Router::new()
        .route("/user/logout", post(logout))
        .route_layer(middleware::from_fn(require_authentication));

    router
        .route("/user/signup", get(signup_form).post(signup))
        .route(LOGIN_PATH, get(login_form).post(login))
        .merge(protected)
}
